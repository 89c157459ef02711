use std::fmt;

use tracing::warn;

/// Process exit status used when an answer check fails.
pub const CHECK_FAILED_EXIT_CODE: i32 = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome<T> {
    Passed,
    Failed { actual: T, expected: T },
}

impl<T: fmt::Display> CheckOutcome<T> {
    pub const fn passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Console line for the check, tagged with `label`.
    pub fn message(&self, label: &str) -> String {
        match self {
            Self::Passed => format!("[{label}] Test passed."),
            Self::Failed { actual, expected } => {
                format!("[{label}] Test failed: {actual} actual, {expected} expected.")
            }
        }
    }
}

/// Runs `solver` on `input` and compares its answer with `expected`.
pub fn check_answer<I, T, F>(solver: F, input: I, expected: T) -> CheckOutcome<T>
where
    F: FnOnce(I) -> T,
    T: PartialEq + fmt::Debug,
{
    let actual = solver(input);
    if actual == expected {
        CheckOutcome::Passed
    } else {
        warn!(?actual, ?expected, "answer mismatch");
        CheckOutcome::Failed { actual, expected }
    }
}
