//! Lollipop Streaks
//!
//! This example demonstrates a Moore machine that raises an alert whenever
//! the same lollipop flavor is handed out three times in a row.
//!
//! Key concepts:
//! - Building a streak detector instead of writing the table by hand
//! - Driving the machine lazily and reacting to per-step outputs
//! - Checkpointing the machine mid-stream and resuming from the document
//!
//! Run with: cargo run --example toy_problem

use finite_machines::builder::StreakDetector;
use finite_machines::engine::Machine;

const INPUTS: &str = "SLSLSLSSLLSSLLSSSLLLSSSSLLLLSSSSSSSS";

fn main() {
    println!("=== Lollipop Streaks Example ===\n");

    let mut machine = StreakDetector::new(["S", "L"])
        .n_streak(3)
        .streak_template("Error! Too many {symbol} lollipops!")
        .build()
        .unwrap();

    println!(
        "Initial state: {:?}, initial output: {:?}",
        machine.current_state(),
        machine.current_output()
    );

    let (first, second) = INPUTS.split_at(INPUTS.len() / 2);

    for (i, step) in machine.run(first.chars().map(String::from)).enumerate() {
        if let Some(alert) = step.unwrap().into_output() {
            println!("  [{i}] {alert}");
        }
    }

    println!("\nCheckpointing at state {:?}", machine.current_state());
    let document = machine.to_json().unwrap();
    let mut resumed = Machine::from_json(&document).unwrap();

    for (i, step) in resumed
        .run(second.chars().map(String::from))
        .enumerate()
    {
        if let Some(alert) = step.unwrap().into_output() {
            println!("  [{}] {alert}", first.len() + i);
        }
    }

    println!(
        "\nFinal state: {:?}, final output: {:?}",
        resumed.current_state(),
        resumed.current_output()
    );
    println!("\n{resumed}");

    println!("\n=== Example Complete ===");
}
