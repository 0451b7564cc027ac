//! Core machine data and validation.
//!
//! This module contains the pure part of the crate:
//! - Raw definitions and finalized transition tables
//! - Missing-transition policies
//! - Variant payloads (accepting states, Moore outputs)
//!
//! Nothing in this module performs I/O or holds a current position.

mod error;
mod policy;
mod table;
mod variant;

pub use error::BuildError;
pub use policy::{MissingTransitionPolicy, DEFAULT_ERROR_STATE};
pub use table::{Definition, TransitionMapping, TransitionTable};
pub use variant::{AcceptingStates, MachineKind, Outputs, Variant};
