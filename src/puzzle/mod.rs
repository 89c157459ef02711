//! Puzzle selection, input retrieval and answer checking.

pub mod check;
pub mod date;
pub mod input;

pub use check::{CHECK_FAILED_EXIT_CODE, CheckOutcome, check_answer};
pub use date::PuzzleDate;
pub use input::{FileInput, HttpInput, InputSource, input_lines};
