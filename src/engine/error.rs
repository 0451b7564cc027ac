//! Runtime transition errors.

use thiserror::Error;

/// Errors that can occur while driving a machine.
///
/// A failed transition never changes the current state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Expected input to be part of the alphabet {alphabet:?}, instead got: {input:?}")]
    UnknownInput { input: String, alphabet: Vec<String> },

    #[error("A transition for input {input:?} from state {state:?} is not defined")]
    UndefinedTransition { state: String, input: String },
}
