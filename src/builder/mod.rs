//! Builder API for ergonomic machine construction.
//!
//! This module provides a fluent builder, a mapping macro, and the streak
//! detector generator.

pub mod machine;
pub mod macros;
pub mod streak;

pub use crate::core::BuildError;
pub use machine::MachineBuilder;
pub use streak::{streak_detector, StreakDetector};
