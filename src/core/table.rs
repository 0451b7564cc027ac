//! Transition tables and their construction-time validation.
//!
//! Construction is two-phase: a raw [`Definition`] is checked and then
//! finalized into an immutable [`TransitionTable`], with any synthesized
//! error-state rows added before the table becomes observable.

use super::error::BuildError;
use super::policy::{MissingTransitionPolicy, DEFAULT_ERROR_STATE};
use std::collections::{BTreeMap, HashSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Mapping of state -> input -> target state.
pub type TransitionMapping = BTreeMap<String, BTreeMap<String, String>>;

/// Raw, unvalidated machine data as supplied by a caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Definition {
    pub alphabet: Vec<String>,
    pub states: Vec<String>,
    pub initial_state: String,
    pub transition_mapping: TransitionMapping,
    /// Position to start from instead of `initial_state`, used when restoring.
    pub current_state: Option<String>,
}

impl Definition {
    pub fn new<A, S>(
        alphabet: A,
        states: S,
        initial_state: impl Into<String>,
        transition_mapping: TransitionMapping,
    ) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            alphabet: alphabet.into_iter().map(Into::into).collect(),
            states: states.into_iter().map(Into::into).collect(),
            initial_state: initial_state.into(),
            transition_mapping,
            current_state: None,
        }
    }

    pub fn with_current_state(mut self, state: impl Into<String>) -> Self {
        self.current_state = Some(state.into());
        self
    }

    /// Check the definition against `policy`, collecting every violation.
    ///
    /// The first violation reported here is the error [`Definition::finalize`]
    /// fails with.
    ///
    /// # Example
    ///
    /// ```rust
    /// use finite_machines::core::{Definition, MissingTransitionPolicy};
    /// use finite_machines::transition_mapping;
    /// use stillwater::validation::Validation;
    ///
    /// let definition = Definition::new(
    ///     ["A"],
    ///     ["Q0", "Q0"],
    ///     "Q9",
    ///     transition_mapping! { "Q0" => { "B" => "Q1" } },
    /// );
    ///
    /// match definition.audit(MissingTransitionPolicy::Ignore) {
    ///     Validation::Failure(errors) => assert_eq!(errors.len(), 4),
    ///     Validation::Success(_) => panic!("definition should be rejected"),
    /// }
    /// ```
    pub fn audit(&self, policy: MissingTransitionPolicy) -> Validation<(), NonEmptyVec<BuildError>> {
        let mut violations = self.consistency_violations();
        if policy == MissingTransitionPolicy::Raise {
            let missing = self.missing_pairs();
            if !missing.is_empty() {
                violations.push(BuildError::IncompleteTransitions { missing });
            }
        }

        let checks: Vec<Validation<(), NonEmptyVec<BuildError>>> = violations
            .into_iter()
            .map(|violation| Validation::fail(violation))
            .collect();

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate the definition and apply `policy`, producing a finalized table.
    ///
    /// `error_state` names the sink used by [`MissingTransitionPolicy::GoToErrorState`]
    /// and defaults to `"ERR"`; other policies ignore it.
    pub fn finalize(
        self,
        policy: MissingTransitionPolicy,
        error_state: Option<&str>,
    ) -> Result<TransitionTable, BuildError> {
        if let Some(violation) = self.consistency_violations().into_iter().next() {
            return Err(violation);
        }

        let Definition {
            alphabet,
            mut states,
            initial_state,
            mut transition_mapping,
            current_state: _,
        } = self;

        match policy {
            MissingTransitionPolicy::Raise => {
                let missing = missing_pairs(&alphabet, &states, &transition_mapping);
                if !missing.is_empty() {
                    return Err(BuildError::IncompleteTransitions { missing });
                }
            }
            MissingTransitionPolicy::GoToErrorState => {
                let error_state = error_state.unwrap_or(DEFAULT_ERROR_STATE);
                route_to_error_state(&alphabet, &mut states, &mut transition_mapping, error_state);
            }
            MissingTransitionPolicy::Ignore => {}
        }

        Ok(TransitionTable {
            symbols: alphabet.iter().cloned().collect(),
            alphabet,
            states,
            initial_state,
            mapping: transition_mapping,
        })
    }

    fn missing_pairs(&self) -> Vec<(String, String)> {
        missing_pairs(&self.alphabet, &self.states, &self.transition_mapping)
    }

    /// Consistency checks, in the order construction reports them.
    fn consistency_violations(&self) -> Vec<BuildError> {
        let mut violations = Vec::new();
        let symbols: HashSet<&str> = self.alphabet.iter().map(String::as_str).collect();
        let states: HashSet<&str> = self.states.iter().map(String::as_str).collect();

        if self.alphabet.is_empty() || symbols.len() < self.alphabet.len() {
            violations.push(BuildError::InvalidAlphabet {
                alphabet: self.alphabet.clone(),
            });
        }
        if self.states.is_empty() || states.len() < self.states.len() {
            violations.push(BuildError::InvalidStates {
                states: self.states.clone(),
            });
        }
        if !states.contains(self.initial_state.as_str()) {
            violations.push(BuildError::InvalidInitialState {
                initial_state: self.initial_state.clone(),
                states: self.states.clone(),
            });
        }
        if let Some(current) = &self.current_state {
            if !states.contains(current.as_str()) {
                violations.push(BuildError::InvalidCurrentStateOverride {
                    current_state: current.clone(),
                    states: self.states.clone(),
                });
            }
        }

        for (state, row) in &self.transition_mapping {
            if !states.contains(state.as_str()) {
                violations.push(BuildError::UnknownTargetState {
                    from: state.clone(),
                    state: state.clone(),
                });
            }
            for (input, target) in row {
                if !symbols.contains(input.as_str()) {
                    violations.push(BuildError::UnknownInputInMapping {
                        state: state.clone(),
                        input: input.clone(),
                    });
                }
                if !states.contains(target.as_str()) {
                    violations.push(BuildError::UnknownTargetState {
                        from: state.clone(),
                        state: target.clone(),
                    });
                }
            }
        }

        violations
    }
}

fn missing_pairs(
    alphabet: &[String],
    states: &[String],
    mapping: &TransitionMapping,
) -> Vec<(String, String)> {
    states
        .iter()
        .flat_map(|state| {
            let row = mapping.get(state);
            alphabet
                .iter()
                .filter(move |input| row.is_none_or(|r| !r.contains_key(*input)))
                .map(move |input| (state.clone(), input.clone()))
        })
        .collect()
}

fn route_to_error_state(
    alphabet: &[String],
    states: &mut Vec<String>,
    mapping: &mut TransitionMapping,
    error_state: &str,
) {
    let mut filled = 0usize;
    for state in states.iter() {
        let row = mapping.entry(state.clone()).or_default();
        for input in alphabet {
            if !row.contains_key(input) {
                row.insert(input.clone(), error_state.to_string());
                filled += 1;
            }
        }
    }

    if filled > 0 && !states.iter().any(|s| s == error_state) {
        states.push(error_state.to_string());
        let sink = alphabet
            .iter()
            .map(|input| (input.clone(), error_state.to_string()))
            .collect();
        mapping.insert(error_state.to_string(), sink);
    }

    if filled > 0 {
        tracing::debug!(error_state, filled, "Routed missing transitions to error state");
    }
}

/// A validated, immutable transition table.
///
/// Once finalized, no machine operation mutates the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionTable {
    alphabet: Vec<String>,
    symbols: HashSet<String>,
    states: Vec<String>,
    initial_state: String,
    mapping: TransitionMapping,
}

impl TransitionTable {
    pub fn alphabet(&self) -> &[String] {
        &self.alphabet
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    pub fn mapping(&self) -> &TransitionMapping {
        &self.mapping
    }

    /// Check if `input` belongs to the alphabet.
    pub fn contains_input(&self, input: &str) -> bool {
        self.symbols.contains(input)
    }

    /// Target of `state` on `input`, if the pair is mapped.
    pub fn target(&self, state: &str, input: &str) -> Option<&str> {
        self.mapping
            .get(state)
            .and_then(|row| row.get(input))
            .map(String::as_str)
    }

    /// Check if every state maps every input.
    pub fn is_complete(&self) -> bool {
        missing_pairs(&self.alphabet, &self.states, &self.mapping).is_empty()
    }
}
