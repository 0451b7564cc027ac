//! The machine record and its transition algorithm.

use super::error::TransitionError;
use super::run::Run;
use crate::core::{
    AcceptingStates, BuildError, Definition, MachineKind, MissingTransitionPolicy, Outputs,
    TransitionMapping, TransitionTable, Variant,
};
use std::fmt;

/// Value reported by a single transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// Base machines report only the state change.
    Transitioned,

    /// Whether the new state is accepting.
    Accepting(bool),

    /// Output of the new state, if it has one.
    Output(Option<String>),
}

impl StepResult {
    /// Acceptance reported by an acceptor step.
    pub fn is_accepting(&self) -> Option<bool> {
        match self {
            Self::Accepting(accepting) => Some(*accepting),
            _ => None,
        }
    }

    /// Output reported by a Moore step.
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Output(output) => output.as_deref(),
            _ => None,
        }
    }

    pub fn into_output(self) -> Option<String> {
        match self {
            Self::Output(output) => output,
            _ => None,
        }
    }
}

/// Construction options shared by every machine flavor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MachineOptions {
    /// How to treat (state, input) pairs the definition leaves unmapped.
    pub policy: MissingTransitionPolicy,

    /// Sink state for [`MissingTransitionPolicy::GoToErrorState`]; `"ERR"` when unset.
    pub error_state: Option<String>,
}

impl MachineOptions {
    pub fn with_policy(policy: MissingTransitionPolicy) -> Self {
        Self {
            policy,
            error_state: None,
        }
    }

    pub fn error_state(mut self, state: impl Into<String>) -> Self {
        self.error_state = Some(state.into());
        self
    }
}

/// Deterministic finite-state machine over string symbols.
///
/// A machine exclusively owns its table, variant payload and current state.
/// Only [`Machine::transition`] and [`Machine::reset`] change the current state.
///
/// # Example
///
/// ```rust
/// use finite_machines::core::Definition;
/// use finite_machines::engine::{Machine, MachineOptions};
/// use finite_machines::transition_mapping;
///
/// let definition = Definition::new(
///     ["coin", "push"],
///     ["Locked", "Unlocked"],
///     "Locked",
///     transition_mapping! {
///         "Locked" => { "coin" => "Unlocked", "push" => "Locked" },
///         "Unlocked" => { "coin" => "Unlocked", "push" => "Locked" },
///     },
/// );
///
/// let mut turnstile =
///     Machine::acceptor(definition, ["Unlocked"], MachineOptions::default()).unwrap();
///
/// let accepted: Vec<bool> = turnstile
///     .run(["coin", "push"])
///     .map(|step| step.unwrap().is_accepting().unwrap())
///     .collect();
/// assert_eq!(accepted, [true, false]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Machine {
    table: TransitionTable,
    current: String,
    variant: Variant,
}

impl Machine {
    /// Build a transition-only machine.
    pub fn base(definition: Definition, options: MachineOptions) -> Result<Self, BuildError> {
        let (table, current) = Self::finalize(definition, &options)?;
        Ok(Self {
            table,
            current,
            variant: Variant::Base,
        })
    }

    /// Build an acceptor machine.
    ///
    /// Accepting states need not be reachable, non-empty, or declared.
    pub fn acceptor<I>(
        definition: Definition,
        accepting_states: I,
        options: MachineOptions,
    ) -> Result<Self, BuildError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let (table, current) = Self::finalize(definition, &options)?;
        let accepting = AcceptingStates::new(accepting_states)?;
        Ok(Self {
            table,
            current,
            variant: Variant::Acceptor(accepting),
        })
    }

    /// Build a Moore machine.
    pub fn moore(
        definition: Definition,
        outputs: Outputs,
        options: MachineOptions,
    ) -> Result<Self, BuildError> {
        let (table, current) = Self::finalize(definition, &options)?;
        Ok(Self {
            table,
            current,
            variant: Variant::Moore(outputs),
        })
    }

    fn finalize(
        definition: Definition,
        options: &MachineOptions,
    ) -> Result<(TransitionTable, String), BuildError> {
        let current = definition
            .current_state
            .clone()
            .unwrap_or_else(|| definition.initial_state.clone());
        let table = definition.finalize(options.policy, options.error_state.as_deref())?;
        Ok((table, current))
    }

    pub fn kind(&self) -> MachineKind {
        self.variant.kind()
    }

    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn alphabet(&self) -> &[String] {
        self.table.alphabet()
    }

    pub fn states(&self) -> &[String] {
        self.table.states()
    }

    pub fn initial_state(&self) -> &str {
        self.table.initial_state()
    }

    pub fn transition_mapping(&self) -> &TransitionMapping {
        self.table.mapping()
    }

    pub fn current_state(&self) -> &str {
        &self.current
    }

    /// Accepting states, for acceptor machines.
    pub fn accepting_states(&self) -> Option<&[String]> {
        match &self.variant {
            Variant::Acceptor(accepting) => Some(accepting.as_slice()),
            _ => None,
        }
    }

    /// Output mapping, for Moore machines.
    pub fn outputs(&self) -> Option<&Outputs> {
        match &self.variant {
            Variant::Moore(outputs) => Some(outputs),
            _ => None,
        }
    }

    /// Check if the current state is accepting. Always `false` for non-acceptors.
    pub fn is_accepting(&self) -> bool {
        match &self.variant {
            Variant::Acceptor(accepting) => accepting.contains(&self.current),
            _ => false,
        }
    }

    /// Output of the current state. Always `None` for non-Moore machines.
    pub fn current_output(&self) -> Option<&str> {
        match &self.variant {
            Variant::Moore(outputs) => outputs.get(&self.current).map(String::as_str),
            _ => None,
        }
    }

    /// Move to the state mapped from the current state on `input`.
    ///
    /// The current state is left unchanged when this fails.
    pub fn transition(&mut self, input: &str) -> Result<StepResult, TransitionError> {
        if !self.table.contains_input(input) {
            return Err(TransitionError::UnknownInput {
                input: input.to_string(),
                alphabet: self.table.alphabet().to_vec(),
            });
        }

        let target = self
            .table
            .target(&self.current, input)
            .ok_or_else(|| TransitionError::UndefinedTransition {
                state: self.current.clone(),
                input: input.to_string(),
            })?
            .to_string();

        tracing::trace!(from = %self.current, input, to = %target, "Transitioned");
        self.current = target;
        Ok(self.report())
    }

    /// Lazily apply one transition per input, in order.
    ///
    /// Starts from the current state; nothing is reset first.
    pub fn run<I>(&mut self, inputs: I) -> Run<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Run::new(self, inputs.into_iter())
    }

    /// Apply every input, discarding per-step results.
    pub fn feed<I>(&mut self, inputs: I) -> Result<(), TransitionError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.run(inputs).try_for_each(|step| step.map(|_| ()))
    }

    /// Return to the initial state.
    pub fn reset(&mut self) {
        self.current = self.table.initial_state().to_string();
    }

    /// Independent duplicate positioned at the same current state.
    ///
    /// The source table is already valid, so completeness is not re-checked.
    pub fn copy(&self) -> Self {
        tracing::debug!(kind = %self.kind(), current_state = %self.current, "Copied machine");
        self.clone()
    }

    fn report(&self) -> StepResult {
        match &self.variant {
            Variant::Base => StepResult::Transitioned,
            Variant::Acceptor(accepting) => StepResult::Accepting(accepting.contains(&self.current)),
            Variant::Moore(outputs) => StepResult::Output(outputs.get(&self.current).cloned()),
        }
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(alphabet={:?}, states={:?}, initial_state={:?}, current_state={:?}, transition_mapping={:?}",
            self.kind(),
            self.alphabet(),
            self.states(),
            self.initial_state(),
            self.current_state(),
            self.transition_mapping(),
        )?;
        match &self.variant {
            Variant::Base => {}
            Variant::Acceptor(accepting) => {
                write!(f, ", accepting_states={:?}", accepting.as_slice())?;
            }
            Variant::Moore(outputs) => write!(f, ", outputs={:?}", outputs)?,
        }
        f.write_str(")")
    }
}
