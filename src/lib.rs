//! Finite Machines: deterministic finite-state machines over string symbols.
//!
//! Machines are built from a validated transition table and driven one input
//! at a time. Three flavors share one record and differ only in what each
//! transition reports.
//!
//! # Core Concepts
//!
//! - **Definition**: Raw alphabet, states and transitions, checked once at construction
//! - **Policy**: What to do with (state, input) pairs the definition leaves unmapped
//! - **Machine**: A finalized table plus the current state
//! - **Variant**: Base (nothing), acceptor (acceptance) or Moore (state output)
//! - **Checkpoint**: Flat structural document for dump and restore
//!
//! # Example
//!
//! ```rust
//! use finite_machines::builder::MachineBuilder;
//! use finite_machines::core::MissingTransitionPolicy;
//!
//! let mut machine = MachineBuilder::new()
//!     .alphabet(["A"])
//!     .states(["Q0", "Q1"])
//!     .initial("Q0")
//!     .transition("Q0", "A", "Q1")
//!     .policy(MissingTransitionPolicy::GoToErrorState)
//!     .build()
//!     .unwrap();
//!
//! machine.feed(["A", "A", "A"]).unwrap();
//! assert_eq!(machine.current_state(), "ERR");
//!
//! machine.reset();
//! assert_eq!(machine.current_state(), "Q0");
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use builder::{streak_detector, MachineBuilder, StreakDetector};
pub use checkpoint::{CheckpointError, MachineDocument};
pub use core::{BuildError, Definition, MissingTransitionPolicy, TransitionMapping};
pub use engine::{Machine, MachineOptions, StepResult, TransitionError};
