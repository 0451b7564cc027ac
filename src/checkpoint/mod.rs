//! Structural dump and restore of machines.
//!
//! A machine is persisted as a single flat [`MachineDocument`]. Restoring
//! honors the saved current state exactly and skips the completeness check;
//! the consistency checks still run.

use crate::core::{Definition, MissingTransitionPolicy, Outputs, TransitionMapping, Variant};
use crate::engine::{Machine, MachineOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub mod error;

pub use error::CheckpointError;

/// Serializable snapshot of a machine.
///
/// Field order is the serialized key order. Base machines carry neither
/// trailing field; acceptors carry `accepting_states`, Moore machines `outputs`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineDocument {
    pub alphabet: Vec<String>,
    pub states: Vec<String>,
    pub initial_state: String,
    pub current_state: String,
    pub transition_mapping: TransitionMapping,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepting_states: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Outputs>,
}

/// Same fields as [`MachineDocument`], without skipped fields, for
/// non-self-describing encodings.
#[derive(Serialize, Deserialize)]
struct CompactDocument {
    alphabet: Vec<String>,
    states: Vec<String>,
    initial_state: String,
    current_state: String,
    transition_mapping: TransitionMapping,
    accepting_states: Option<Vec<String>>,
    outputs: Option<Outputs>,
}

impl From<MachineDocument> for CompactDocument {
    fn from(document: MachineDocument) -> Self {
        Self {
            alphabet: document.alphabet,
            states: document.states,
            initial_state: document.initial_state,
            current_state: document.current_state,
            transition_mapping: document.transition_mapping,
            accepting_states: document.accepting_states,
            outputs: document.outputs,
        }
    }
}

impl From<CompactDocument> for MachineDocument {
    fn from(compact: CompactDocument) -> Self {
        Self {
            alphabet: compact.alphabet,
            states: compact.states,
            initial_state: compact.initial_state,
            current_state: compact.current_state,
            transition_mapping: compact.transition_mapping,
            accepting_states: compact.accepting_states,
            outputs: compact.outputs,
        }
    }
}

impl MachineDocument {
    pub fn from_machine(machine: &Machine) -> Self {
        let (accepting_states, outputs) = match machine.variant() {
            Variant::Base => (None, None),
            Variant::Acceptor(accepting) => (Some(accepting.as_slice().to_vec()), None),
            Variant::Moore(outputs) => (None, Some(outputs.clone())),
        };

        Self {
            alphabet: machine.alphabet().to_vec(),
            states: machine.states().to_vec(),
            initial_state: machine.initial_state().to_string(),
            current_state: machine.current_state().to_string(),
            transition_mapping: machine.transition_mapping().clone(),
            accepting_states,
            outputs,
        }
    }

    /// Rebuild the machine this document describes.
    pub fn into_machine(self) -> Result<Machine, CheckpointError> {
        let definition = Definition {
            alphabet: self.alphabet,
            states: self.states,
            initial_state: self.initial_state,
            transition_mapping: self.transition_mapping,
            current_state: Some(self.current_state),
        };
        let options = MachineOptions::with_policy(MissingTransitionPolicy::Ignore);

        let machine = match (self.accepting_states, self.outputs) {
            (Some(_), Some(_)) => {
                return Err(CheckpointError::ValidationFailed(
                    "document has both accepting_states and outputs".to_string(),
                ))
            }
            (Some(accepting), None) => Machine::acceptor(definition, accepting, options)?,
            (None, Some(outputs)) => Machine::moore(definition, outputs, options)?,
            (None, None) => Machine::base(definition, options)?,
        };
        Ok(machine)
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        let compact = CompactDocument::from(self.clone());
        Ok(bincode::serialize(&compact)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let compact: CompactDocument = bincode::deserialize(bytes)?;
        Ok(compact.into())
    }
}

impl Machine {
    pub fn to_document(&self) -> MachineDocument {
        MachineDocument::from_machine(self)
    }

    pub fn from_document(document: MachineDocument) -> Result<Self, CheckpointError> {
        document.into_machine()
    }

    /// Canonical JSON text of this machine's document.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        self.to_document().to_json()
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        MachineDocument::from_json(json)?.into_machine()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        self.to_document().to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        MachineDocument::from_bytes(bytes)?.into_machine()
    }

    /// Write this machine's JSON document to `path`.
    pub fn dump(&self, path: impl AsRef<Path>) -> Result<(), CheckpointError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json)?;
        tracing::debug!(path = %path.display(), kind = %self.kind(), "Dumped machine document");
        Ok(())
    }

    /// Read a machine back from a JSON document at `path`.
    pub fn restore(path: impl AsRef<Path>) -> Result<Self, CheckpointError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let machine = Self::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            current_state = machine.current_state(),
            "Restored machine document"
        );
        Ok(machine)
    }
}
