//! Streak detection: Moore machines that count consecutive repeats of a symbol.
//!
//! Every symbol `s` gets a ladder of `n_streak + 1` counting states named
//! `s1`, `s2`, ... `s{n_streak + 1}`. Reading `s` climbs one rung of the `s`
//! ladder (the last rung loops on itself); reading any other symbol `t`
//! restarts on `t1`.

use crate::core::{BuildError, Definition, Outputs, TransitionMapping};
use crate::engine::{Machine, MachineOptions};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Placeholder replaced by the symbol in output templates.
pub const SYMBOL_PLACEHOLDER: &str = "{symbol}";

/// Configuration for a streak-detecting Moore machine.
///
/// # Example
///
/// ```rust
/// use finite_machines::builder::StreakDetector;
///
/// let mut detector = StreakDetector::new(["S", "L"])
///     .n_streak(3)
///     .streak_template("Error! Too many {symbol} lollipops!")
///     .build()
///     .unwrap();
///
/// let outputs: Vec<Option<String>> = detector
///     .run(["S", "S", "S"])
///     .map(|step| step.unwrap().into_output())
///     .collect();
///
/// assert_eq!(
///     outputs,
///     [None, None, Some("Error! Too many S lollipops!".to_string())]
/// );
/// assert_eq!(detector.current_state(), "S3");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreakDetector {
    pub alphabet: Vec<String>,
    pub n_streak: usize,
    pub initial_state: String,
    pub below_template: Option<String>,
    pub streak_template: Option<String>,
    pub above_template: Option<String>,
}

impl Default for StreakDetector {
    fn default() -> Self {
        Self {
            alphabet: Vec::new(),
            n_streak: 3,
            initial_state: "Q0".to_string(),
            below_template: None,
            streak_template: Some(format!("{SYMBOL_PLACEHOLDER} streak detected!")),
            above_template: None,
        }
    }
}

impl StreakDetector {
    pub fn new<I>(alphabet: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            alphabet: alphabet.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Number of consecutive repeats that counts as a streak.
    pub fn n_streak(mut self, n: usize) -> Self {
        self.n_streak = n;
        self
    }

    pub fn initial_state(mut self, state: impl Into<String>) -> Self {
        self.initial_state = state.into();
        self
    }

    /// Output for rungs below the streak length.
    pub fn below_template(mut self, template: impl Into<String>) -> Self {
        self.below_template = Some(template.into());
        self
    }

    /// Output for the rung that completes a streak.
    pub fn streak_template(mut self, template: impl Into<String>) -> Self {
        self.streak_template = Some(template.into());
        self
    }

    /// Output for the rung past the streak length.
    pub fn above_template(mut self, template: impl Into<String>) -> Self {
        self.above_template = Some(template.into());
        self
    }

    /// Drop the streak output so only the other templates apply.
    pub fn without_streak_template(mut self) -> Self {
        self.streak_template = None;
        self
    }

    /// Synthesize the machine.
    ///
    /// The generated table is complete and is validated with the default
    /// `raise` policy.
    pub fn build(&self) -> Result<Machine, BuildError> {
        let n = self.n_streak;
        let last = match n.checked_add(1) {
            Some(last) if n > 0 => last,
            _ => return Err(BuildError::InvalidStreakThreshold { n_streak: n }),
        };

        let restart: BTreeMap<String, String> = self
            .alphabet
            .iter()
            .map(|symbol| (symbol.clone(), rung(symbol, 1)))
            .collect();

        let mut states = vec![self.initial_state.clone()];
        let mut mapping = TransitionMapping::new();
        let mut outputs = Outputs::new();
        mapping.insert(self.initial_state.clone(), restart.clone());

        for symbol in &self.alphabet {
            for i in 1..=last {
                let state = rung(symbol, i);

                let mut row = restart.clone();
                row.insert(symbol.clone(), rung(symbol, (i + 1).min(last)));
                mapping.insert(state.clone(), row);

                let template = match i.cmp(&n) {
                    Ordering::Less => self.below_template.as_deref(),
                    Ordering::Equal => self.streak_template.as_deref(),
                    Ordering::Greater => self.above_template.as_deref(),
                };
                if let Some(template) = template.filter(|t| !t.is_empty()) {
                    outputs.insert(state.clone(), render(template, symbol));
                }

                states.push(state);
            }
        }

        let definition = Definition::new(
            self.alphabet.iter().cloned(),
            states,
            self.initial_state.clone(),
            mapping,
        );
        Machine::moore(definition, outputs, MachineOptions::default())
    }
}

/// Build a streak detector from positional arguments.
///
/// Templates that are `None` or empty produce no output for their rungs.
pub fn streak_detector<I>(
    alphabet: I,
    n_streak: usize,
    initial_state: &str,
    below_template: Option<&str>,
    streak_template: Option<&str>,
    above_template: Option<&str>,
) -> Result<Machine, BuildError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    StreakDetector {
        alphabet: alphabet.into_iter().map(Into::into).collect(),
        n_streak,
        initial_state: initial_state.to_string(),
        below_template: below_template.map(str::to_string),
        streak_template: streak_template.map(str::to_string),
        above_template: above_template.map(str::to_string),
    }
    .build()
}

fn rung(symbol: &str, i: usize) -> String {
    format!("{symbol}{i}")
}

fn render(template: &str, symbol: &str) -> String {
    template.replace(SYMBOL_PLACEHOLDER, symbol)
}
