//! End-to-end scenarios: policies, streak detection and checkpoint files.

use finite_machines::builder::{streak_detector, MachineBuilder, StreakDetector};
use finite_machines::checkpoint::MachineDocument;
use finite_machines::config::MachineConfig;
use finite_machines::core::{BuildError, Definition, MissingTransitionPolicy};
use finite_machines::engine::{Machine, MachineOptions, StepResult, TransitionError};
use finite_machines::transition_mapping;

#[test]
fn error_state_policy_synthesizes_a_sink() {
    let definition = Definition::new(
        ["A"],
        ["Q0", "Q1"],
        "Q0",
        transition_mapping! { "Q0" => { "A" => "Q1" } },
    );
    let mut machine = Machine::base(
        definition,
        MachineOptions::with_policy(MissingTransitionPolicy::GoToErrorState),
    )
    .unwrap();

    assert_eq!(machine.states(), ["Q0", "Q1", "ERR"]);
    assert_eq!(
        machine.transition_mapping(),
        &transition_mapping! {
            "Q0" => { "A" => "Q1" },
            "Q1" => { "A" => "ERR" },
            "ERR" => { "A" => "ERR" },
        }
    );

    let mut visited = Vec::new();
    for input in ["A", "A", "A"] {
        machine.transition(input).unwrap();
        visited.push(machine.current_state().to_string());
    }
    assert_eq!(visited, ["Q1", "ERR", "ERR"]);
}

#[test]
fn raise_policy_rejects_incomplete_mapping() {
    let result = MachineBuilder::new()
        .alphabet(["S", "L"])
        .states(["Q0", "S1"])
        .initial("Q0")
        .transitions(transition_mapping! {
            "Q0" => { "S" => "S1", "L" => "Q0" },
            "S1" => { "S" => "S1" },
        })
        .build();

    assert!(matches!(
        result,
        Err(BuildError::IncompleteTransitions { ref missing }) if missing == &[("S1".to_string(), "L".to_string())]
    ));
}

#[test]
fn ignore_policy_defers_to_transition_time() {
    let mut machine = MachineBuilder::new()
        .alphabet(["S", "L"])
        .states(["Q0", "S1"])
        .initial("Q0")
        .transitions(transition_mapping! {
            "Q0" => { "S" => "S1", "L" => "Q0" },
            "S1" => { "S" => "S1" },
        })
        .policy(MissingTransitionPolicy::Ignore)
        .build()
        .unwrap();

    let results: Vec<_> = machine.run(["S", "L", "S"]).collect();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0], Ok(StepResult::Transitioned));
    assert!(matches!(
        results[1],
        Err(TransitionError::UndefinedTransition { .. })
    ));
    assert_eq!(machine.current_state(), "S1");
}

#[test]
fn lollipop_streaks_are_reported() {
    let mut detector = streak_detector(
        ["S", "L"],
        3,
        "Q0",
        None,
        Some("Error! Too many {symbol} lollipops!"),
        None,
    )
    .unwrap();

    let outputs: Vec<Option<String>> = detector
        .run(["S", "S", "S"])
        .map(|step| step.unwrap().into_output())
        .collect();
    assert_eq!(
        outputs,
        [None, None, Some("Error! Too many S lollipops!".to_string())]
    );
    assert_eq!(detector.current_state(), "S3");

    let fourth = detector.transition("S").unwrap();
    assert_eq!(fourth, StepResult::Output(None));
    assert_eq!(detector.current_state(), "S4");
}

#[test]
fn toy_problem_emits_each_streak_once() {
    let mut detector = StreakDetector::new(["S", "L"])
        .streak_template("Error! Too many {symbol} lollipops!")
        .build()
        .unwrap();

    let inputs = "SLSLSLSSLLSSLLSSSLLLSSSSLLLLSSSSSSSS";
    let alerts: Vec<String> = detector
        .run(inputs.chars().map(String::from))
        .filter_map(|step| step.unwrap().into_output())
        .collect();

    assert_eq!(
        alerts,
        [
            "Error! Too many S lollipops!",
            "Error! Too many L lollipops!",
            "Error! Too many S lollipops!",
            "Error! Too many L lollipops!",
            "Error! Too many S lollipops!",
        ]
    );
    assert_eq!(detector.current_state(), "S4");
}

#[test]
fn configuration_file_to_checkpoint_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("parity.json");
    std::fs::write(
        &config_path,
        r#"{
            "alphabet": ["0", "1"],
            "states": ["Even", "Odd"],
            "initial_state": "Even",
            "transition_mapping": {
                "Even": {"0": "Even", "1": "Odd"},
                "Odd": {"0": "Odd", "1": "Even"}
            },
            "accepting_states": ["Even"]
        }"#,
    )
    .unwrap();

    let mut machine = MachineConfig::load(&config_path).unwrap().build().unwrap();
    let accepted: Vec<bool> = machine
        .run(["1", "1", "1"])
        .map(|step| step.unwrap().is_accepting().unwrap())
        .collect();
    assert_eq!(accepted, [false, true, false]);

    let checkpoint_path = dir.path().join("parity.checkpoint.json");
    machine.dump(&checkpoint_path).unwrap();

    let text = std::fs::read_to_string(&checkpoint_path).unwrap();
    let document = MachineDocument::from_json(&text).unwrap();
    assert_eq!(document.current_state, "Odd");
    assert_eq!(document.accepting_states, Some(vec!["Even".to_string()]));
    assert_eq!(document.outputs, None);

    let mut restored = Machine::restore(&checkpoint_path).unwrap();
    assert_eq!(restored.current_state(), "Odd");
    assert!(!restored.is_accepting());
    assert_eq!(restored.transition("1"), Ok(StepResult::Accepting(true)));
}

#[test]
fn copy_survives_source_mutation() {
    let mut machine = StreakDetector::new(["x", "y"]).n_streak(2).build().unwrap();
    machine.feed(["x"]).unwrap();

    let snapshot = machine.copy();
    machine.feed(["x", "x", "y"]).unwrap();

    assert_eq!(snapshot.current_state(), "x1");
    assert_eq!(machine.current_state(), "y1");
    assert_eq!(snapshot.to_document().transition_mapping, machine.to_document().transition_mapping);
}
