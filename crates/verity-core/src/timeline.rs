//! Pure construction of the session step list.
//!
//! The original study built its timeline by pushing screens one by one;
//! here the whole step list is computed up front and the engine walks it.

use serde::{Deserialize, Serialize};

/// Default number of rating trials between break screens.
pub const DEFAULT_BREAK_INTERVAL: u32 = 24;

/// One step of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Consent,
    Instructions,
    Rating {
        /// 0-based index into the shuffled list.
        index: usize,
    },
    Break {
        /// Number of trials completed when the break is shown.
        completed: usize,
    },
    Save,
    ThankYou,
}

/// Build the ordered step list for `n_trials` rating trials.
///
/// A break screen follows every `break_interval`-th trial, but never the
/// last one -- when `n_trials` is itself a multiple of the interval the
/// final break is suppressed. `n_trials == 0` still produces the
/// consent/instructions/save/thank-you frame.
pub fn build(n_trials: usize, break_interval: u32) -> Vec<Step> {
    let mut steps = vec![Step::Consent, Step::Instructions];
    let interval = break_interval.max(1) as usize;
    for index in 0..n_trials {
        steps.push(Step::Rating { index });
        let done = index + 1;
        if done % interval == 0 && done < n_trials {
            steps.push(Step::Break { completed: done });
        }
    }
    steps.push(Step::Save);
    steps.push(Step::ThankYou);
    steps
}
