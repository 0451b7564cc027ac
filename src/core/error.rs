//! Definitional errors raised while constructing a machine.

use thiserror::Error;

/// Errors that can occur when validating a machine definition.
///
/// Every variant is reported before a machine exists; a machine is never
/// partially built.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Expected alphabet to be non-empty and contain unique elements, instead got: {alphabet:?}")]
    InvalidAlphabet { alphabet: Vec<String> },

    #[error("Expected states to be non-empty and contain unique elements, instead got: {states:?}")]
    InvalidStates { states: Vec<String> },

    #[error("Expected initial_state to be one of {states:?}, instead got: {initial_state:?}")]
    InvalidInitialState {
        initial_state: String,
        states: Vec<String>,
    },

    #[error("Expected current_state to be one of {states:?}, instead got: {current_state:?}")]
    InvalidCurrentStateOverride {
        current_state: String,
        states: Vec<String>,
    },

    #[error("State {state:?} maps input {input:?}, which is not part of the alphabet")]
    UnknownInputInMapping { state: String, input: String },

    #[error("Transition row {from:?} references undeclared state {state:?}")]
    UnknownTargetState { from: String, state: String },

    #[error("Transitions are not defined for (state, input) pairs: {missing:?}")]
    IncompleteTransitions { missing: Vec<(String, String)> },

    #[error("Expected on_missing_transitions to be 'raise', 'go_to_error_state' or 'ignore', instead got: {policy:?}")]
    InvalidPolicy { policy: String },

    #[error("Expected accepting_states to contain unique elements, {state:?} is repeated")]
    DuplicateAcceptingState { state: String },

    #[error("Expected n_streak to be an integer >= 1, instead got: {n_streak}")]
    InvalidStreakThreshold { n_streak: usize },

    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("A machine cannot have both accepting states and outputs")]
    ConflictingVariant,
}
