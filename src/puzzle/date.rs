use std::fmt;

use chrono::{Datelike, Utc};

pub const FIRST_YEAR: i32 = 2015;
pub const FIRST_DAY: u32 = 1;
pub const LAST_DAY: u32 = 25;

/// A puzzle identified by event year and day, always within the published
/// range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PuzzleDate {
    year: i32,
    day: u32,
}

impl PuzzleDate {
    /// Clamps `year` to `2015..=` the current year and `day` to `1..=25`.
    pub fn new(year: i32, day: u32) -> Self {
        Self::clamped(year, day, current_year())
    }

    pub fn clamped(year: i32, day: u32, latest_year: i32) -> Self {
        Self {
            year: year.clamp(FIRST_YEAR, latest_year.max(FIRST_YEAR)),
            day: day.clamp(FIRST_DAY, LAST_DAY),
        }
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn day(&self) -> u32 {
        self.day
    }

    pub fn input_path(&self) -> String {
        format!("{}/day/{}/input", self.year, self.day)
    }
}

impl Default for PuzzleDate {
    fn default() -> Self {
        Self::new(current_year(), FIRST_DAY)
    }
}

impl fmt::Display for PuzzleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} day {}", self.year, self.day)
    }
}

pub fn current_year() -> i32 {
    Utc::now().year()
}
