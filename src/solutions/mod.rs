//! Sample solvers declared as process-wide cacheable functions.
//!
//! Each takes `(input text, part)` and returns the integer answer.

pub mod calorie_counting;
pub mod tuning_trouble;

use crate::cache::CachedFn;

pub const CALORIE_COUNTING: CachedFn<(String, i64), i64> = CachedFn::new("calorie_counting");
pub const TUNING_TROUBLE: CachedFn<(String, i64), i64> = CachedFn::new("tuning_trouble");
