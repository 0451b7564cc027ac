//! Missing-transition policies.

use super::error::BuildError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier used for the synthesized sink when no error state is given.
pub const DEFAULT_ERROR_STATE: &str = "ERR";

/// What to do when a definition does not map every (state, input) pair.
///
/// Applied exactly once, when the transition table is finalized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum MissingTransitionPolicy {
    /// Reject incomplete definitions with [`BuildError::IncompleteTransitions`].
    #[default]
    Raise,

    /// Route every missing pair to an error state that loops on itself.
    GoToErrorState,

    /// Accept the gaps; transitioning through one fails at runtime.
    Ignore,
}

impl MissingTransitionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raise => "raise",
            Self::GoToErrorState => "go_to_error_state",
            Self::Ignore => "ignore",
        }
    }
}

impl fmt::Display for MissingTransitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissingTransitionPolicy {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raise" => Ok(Self::Raise),
            "go_to_error_state" => Ok(Self::GoToErrorState),
            "ignore" => Ok(Self::Ignore),
            other => Err(BuildError::InvalidPolicy {
                policy: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for MissingTransitionPolicy {
    type Error = BuildError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
