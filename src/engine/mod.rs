//! Machine execution.
//!
//! This module wraps a finalized transition table with a current position:
//! - `Machine`: the single record shared by every flavor
//! - `StepResult`: what a flavor reports after each transition
//! - `Run`: lazy, in-order driving over an input sequence
//!
//! Flavors differ only in their [`Variant`](crate::core::Variant) payload.

mod error;
mod machine;
mod run;

pub use error::TransitionError;
pub use machine::{Machine, MachineOptions, StepResult};
pub use run::Run;
