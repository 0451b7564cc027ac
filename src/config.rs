//! Machine definitions loaded from static configuration.
//!
//! A [`MachineConfig`] is the caller-facing form of a definition: it carries
//! the missing-transition policy and error state alongside the table, and it
//! never carries a current position.

use crate::core::{BuildError, Definition, MissingTransitionPolicy, Outputs, TransitionMapping};
use crate::engine::{Machine, MachineOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Errors that can occur when loading a machine from configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid machine definition: {0}")]
    Build(#[from] BuildError),
}

/// Machine definition as written in a configuration file.
///
/// # Example
///
/// ```rust
/// use finite_machines::config::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{
///     "alphabet": ["A"],
///     "states": ["Q0", "Q1"],
///     "initial_state": "Q0",
///     "transition_mapping": {"Q0": {"A": "Q1"}},
///     "on_missing_transitions": "go_to_error_state"
/// }"#).unwrap();
///
/// let machine = config.build().unwrap();
/// assert_eq!(machine.states(), ["Q0", "Q1", "ERR"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    pub alphabet: Vec<String>,
    pub states: Vec<String>,
    pub initial_state: String,
    #[serde(default)]
    pub transition_mapping: TransitionMapping,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepting_states: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Outputs>,
    #[serde(default)]
    pub on_missing_transitions: MissingTransitionPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_state: Option<String>,
}

impl MachineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), "Loaded machine configuration");
        Ok(config)
    }

    fn definition(&self) -> Definition {
        Definition::new(
            self.alphabet.iter().cloned(),
            self.states.iter().cloned(),
            self.initial_state.clone(),
            self.transition_mapping.clone(),
        )
    }

    fn options(&self) -> MachineOptions {
        MachineOptions {
            policy: self.on_missing_transitions,
            error_state: self.error_state.clone(),
        }
    }

    /// Report every problem with the configured table at once.
    pub fn audit(&self) -> Validation<(), NonEmptyVec<BuildError>> {
        self.definition().audit(self.on_missing_transitions)
    }

    pub fn build(&self) -> Result<Machine, BuildError> {
        let definition = self.definition();
        let options = self.options();
        match (&self.accepting_states, &self.outputs) {
            (Some(_), Some(_)) => Err(BuildError::ConflictingVariant),
            (Some(accepting), None) => {
                Machine::acceptor(definition, accepting.iter().cloned(), options)
            }
            (None, Some(outputs)) => Machine::moore(definition, outputs.clone(), options),
            (None, None) => Machine::base(definition, options),
        }
    }
}
