//! Lazy, step-by-step driving of a machine over an input sequence.

use super::error::TransitionError;
use super::machine::{Machine, StepResult};

/// Iterator returned by [`Machine::run`].
///
/// Each pulled element applies exactly one transition. The first failure is
/// yielded and ends the run; the machine stays where the last successful
/// transition left it.
pub struct Run<'m, I> {
    machine: &'m mut Machine,
    inputs: I,
    failed: bool,
}

impl<'m, I> Run<'m, I> {
    pub(crate) fn new(machine: &'m mut Machine, inputs: I) -> Self {
        Self {
            machine,
            inputs,
            failed: false,
        }
    }

    /// Current state of the machine being driven.
    pub fn current_state(&self) -> &str {
        self.machine.current_state()
    }
}

impl<I> Iterator for Run<'_, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<StepResult, TransitionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let input = self.inputs.next()?;
        let result = self.machine.transition(input.as_ref());
        self.failed = result.is_err();
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            (0, self.inputs.size_hint().1)
        }
    }
}
