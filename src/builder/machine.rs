//! Builder for constructing machines.

use crate::core::{BuildError, Definition, MissingTransitionPolicy, Outputs, TransitionMapping};
use crate::engine::{Machine, MachineOptions};

/// Builder for constructing machines with a fluent API.
///
/// The flavor follows from what is supplied: accepting states make an
/// acceptor, outputs make a Moore machine, neither makes a base machine.
#[derive(Clone, Debug, Default)]
pub struct MachineBuilder {
    alphabet: Vec<String>,
    states: Vec<String>,
    initial: Option<String>,
    current: Option<String>,
    mapping: TransitionMapping,
    options: MachineOptions,
    accepting: Option<Vec<String>>,
    outputs: Option<Outputs>,
}

impl MachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input alphabet.
    pub fn alphabet<I>(mut self, symbols: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.alphabet = symbols.into_iter().map(Into::into).collect();
        self
    }

    /// Set the declared states.
    pub fn states<I>(mut self, states: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.states = states.into_iter().map(Into::into).collect();
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<String>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Start from `state` instead of the initial state.
    pub fn current_state(mut self, state: impl Into<String>) -> Self {
        self.current = Some(state.into());
        self
    }

    /// Map `from` to `to` on `input`, replacing any earlier entry for the pair.
    pub fn transition(
        mut self,
        from: impl Into<String>,
        input: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.mapping
            .entry(from.into())
            .or_default()
            .insert(input.into(), to.into());
        self
    }

    /// Merge a whole mapping into the transitions defined so far.
    pub fn transitions(mut self, mapping: TransitionMapping) -> Self {
        for (state, row) in mapping {
            self.mapping.entry(state).or_default().extend(row);
        }
        self
    }

    pub fn policy(mut self, policy: MissingTransitionPolicy) -> Self {
        self.options.policy = policy;
        self
    }

    /// Set the policy by name.
    /// Returns an error if the name is not a recognized policy.
    pub fn on_missing_transitions(self, policy: &str) -> Result<Self, BuildError> {
        Ok(self.policy(policy.parse()?))
    }

    /// Name the sink used by [`MissingTransitionPolicy::GoToErrorState`].
    pub fn error_state(mut self, state: impl Into<String>) -> Self {
        self.options.error_state = Some(state.into());
        self
    }

    /// Make an acceptor with these accepting states.
    pub fn accepting<I>(mut self, states: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.accepting
            .get_or_insert_with(Vec::new)
            .extend(states.into_iter().map(Into::into));
        self
    }

    /// Make a Moore machine emitting `output` in `state`.
    pub fn output(mut self, state: impl Into<String>, output: impl Into<String>) -> Self {
        self.outputs
            .get_or_insert_with(Outputs::new)
            .insert(state.into(), output.into());
        self
    }

    /// Make a Moore machine with these outputs, merged into any set earlier.
    pub fn outputs(mut self, outputs: Outputs) -> Self {
        self.outputs.get_or_insert_with(Outputs::new).extend(outputs);
        self
    }

    /// Build the machine.
    /// Returns an error if required fields are missing or the definition is invalid.
    pub fn build(self) -> Result<Machine, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut definition = Definition::new(self.alphabet, self.states, initial, self.mapping);
        definition.current_state = self.current;

        match (self.accepting, self.outputs) {
            (Some(_), Some(_)) => Err(BuildError::ConflictingVariant),
            (Some(accepting), None) => Machine::acceptor(definition, accepting, self.options),
            (None, Some(outputs)) => Machine::moore(definition, outputs, self.options),
            (None, None) => Machine::base(definition, self.options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MachineKind;
    use crate::engine::StepResult;

    fn switch() -> MachineBuilder {
        MachineBuilder::new()
            .alphabet(["toggle"])
            .states(["Off", "On"])
            .initial("Off")
            .transition("Off", "toggle", "On")
            .transition("On", "toggle", "Off")
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = MachineBuilder::new().alphabet(["a"]).states(["A"]).build();

        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn builder_rejects_empty_alphabet() {
        let result = MachineBuilder::new().states(["A"]).initial("A").build();

        assert!(matches!(result, Err(BuildError::InvalidAlphabet { .. })));
    }

    #[test]
    fn fluent_api_builds_base_machine() {
        let mut machine = switch().build().unwrap();

        assert_eq!(machine.kind(), MachineKind::Base);
        assert_eq!(machine.current_state(), "Off");
        assert_eq!(machine.transition("toggle"), Ok(StepResult::Transitioned));
        assert_eq!(machine.current_state(), "On");
    }

    #[test]
    fn accepting_states_make_an_acceptor() {
        let mut machine = switch().accepting(["On"]).build().unwrap();

        assert_eq!(machine.kind(), MachineKind::Acceptor);
        assert_eq!(machine.transition("toggle"), Ok(StepResult::Accepting(true)));
    }

    #[test]
    fn outputs_make_a_moore_machine() {
        let mut machine = switch().output("On", "light").build().unwrap();

        assert_eq!(machine.kind(), MachineKind::Moore);
        assert_eq!(
            machine.transition("toggle"),
            Ok(StepResult::Output(Some("light".to_string())))
        );
        assert_eq!(machine.transition("toggle"), Ok(StepResult::Output(None)));
    }

    #[test]
    fn accepting_and_outputs_conflict() {
        let result = switch().accepting(["On"]).output("On", "light").build();

        assert_eq!(result, Err(BuildError::ConflictingVariant));
    }

    #[test]
    fn incomplete_definition_is_rejected_by_default() {
        let result = MachineBuilder::new()
            .alphabet(["a"])
            .states(["A", "B"])
            .initial("A")
            .transition("A", "a", "B")
            .build();

        assert_eq!(
            result,
            Err(BuildError::IncompleteTransitions {
                missing: vec![("B".to_string(), "a".to_string())],
            })
        );
    }

    #[test]
    fn policy_names_are_parsed() {
        let machine = MachineBuilder::new()
            .alphabet(["a"])
            .states(["A", "B"])
            .initial("A")
            .transition("A", "a", "B")
            .on_missing_transitions("go_to_error_state")
            .unwrap()
            .error_state("TRAP")
            .build()
            .unwrap();

        assert_eq!(machine.states(), ["A", "B", "TRAP"]);

        let invalid = MachineBuilder::new().on_missing_transitions("retry");
        assert!(matches!(invalid, Err(BuildError::InvalidPolicy { .. })));
    }

    #[test]
    fn transitions_merge_with_single_entries() {
        let machine = MachineBuilder::new()
            .alphabet(["a", "b"])
            .states(["A"])
            .initial("A")
            .transition("A", "a", "A")
            .transitions(crate::transition_mapping! { "A" => { "b" => "A" } })
            .build()
            .unwrap();

        assert_eq!(machine.transition_mapping()["A"].len(), 2);
    }

    #[test]
    fn current_state_is_forwarded() {
        let machine = switch().current_state("On").build().unwrap();

        assert_eq!(machine.current_state(), "On");

        let invalid = switch().current_state("Broken").build();
        assert!(matches!(
            invalid,
            Err(BuildError::InvalidCurrentStateOverride { .. })
        ));
    }
}
