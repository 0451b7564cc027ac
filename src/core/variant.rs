//! Per-variant payloads carried alongside the transition table.

use super::error::BuildError;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Output values of a Moore machine, keyed by state.
///
/// States without an entry have no output. Entries for undeclared states are
/// kept as-is and never observed.
pub type Outputs = BTreeMap<String, String>;

/// Ordered set of accepting states.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AcceptingStates {
    ordered: Vec<String>,
    members: HashSet<String>,
}

impl AcceptingStates {
    /// Build the set, rejecting repeated entries.
    pub fn new<I>(states: I) -> Result<Self, BuildError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut ordered = Vec::new();
        let mut members = HashSet::new();
        for state in states {
            let state = state.into();
            if !members.insert(state.clone()) {
                return Err(BuildError::DuplicateAcceptingState { state });
            }
            ordered.push(state);
        }
        Ok(Self { ordered, members })
    }

    pub fn contains(&self, state: &str) -> bool {
        self.members.contains(state)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// Which flavor of machine a [`Variant`] describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MachineKind {
    Base,
    Acceptor,
    Moore,
}

impl fmt::Display for MachineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Base => "BaseMachine",
            Self::Acceptor => "AcceptorMachine",
            Self::Moore => "MooreMachine",
        };
        f.write_str(name)
    }
}

/// Extra data a machine reports on every transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Transitions report nothing beyond the state change.
    Base,

    /// Transitions report whether the new state is accepting.
    Acceptor(AcceptingStates),

    /// Transitions report the output of the new state.
    Moore(Outputs),
}

impl Variant {
    pub fn kind(&self) -> MachineKind {
        match self {
            Self::Base => MachineKind::Base,
            Self::Acceptor(_) => MachineKind::Acceptor,
            Self::Moore(_) => MachineKind::Moore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepting_states_keep_order() {
        let accepting = AcceptingStates::new(["B", "A", "C"]).unwrap();
        assert_eq!(accepting.as_slice(), ["B", "A", "C"]);
        assert_eq!(accepting.len(), 3);
        assert!(accepting.contains("A"));
        assert!(!accepting.contains("D"));
    }

    #[test]
    fn repeated_accepting_state_is_rejected() {
        let result = AcceptingStates::new(["A", "B", "A"]);
        assert_eq!(
            result,
            Err(BuildError::DuplicateAcceptingState {
                state: "A".to_string()
            })
        );
    }

    #[test]
    fn empty_accepting_states_are_allowed() {
        let accepting = AcceptingStates::new(Vec::<String>::new()).unwrap();
        assert!(accepting.is_empty());
    }

    #[test]
    fn variant_reports_kind() {
        assert_eq!(Variant::Base.kind(), MachineKind::Base);
        assert_eq!(
            Variant::Acceptor(AcceptingStates::default()).kind(),
            MachineKind::Acceptor
        );
        assert_eq!(Variant::Moore(Outputs::new()).kind(), MachineKind::Moore);
        assert_eq!(MachineKind::Moore.to_string(), "MooreMachine");
    }
}
