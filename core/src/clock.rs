//! Simulation calendar — the day window every customer is advanced
//! through.

use crate::types::SimDay;
use chrono::{Duration, Months};
use serde::{Deserialize, Serialize};

/// The simulated span: `start` inclusive, `end` exclusive.
///
/// A customer's clock begins at `start` and the run is DONE once the
/// clock reaches `end`, so the last simulated day is `end - 1`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimWindow {
    pub start: SimDay,
    pub end: SimDay,
}

impl SimWindow {
    pub fn new(start: SimDay, end: SimDay) -> Self {
        assert!(start <= end, "window start after end");
        Self { start, end }
    }

    /// The standard window: `years` before `today` up to "yesterday".
    pub fn lookback(today: SimDay, years: u32) -> Self {
        let start = today
            .checked_sub_months(Months::new(years * 12))
            .expect("window start before calendar epoch");
        Self::new(start, today - Duration::days(1))
    }

    /// Number of days a run inside this window simulates.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn contains(&self, day: SimDay) -> bool {
        self.start <= day && day < self.end
    }
}
