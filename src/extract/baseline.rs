// src/extract/baseline.rs

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Expected pre-pandemic riders per day of week, indexed Sunday = 0 … Saturday = 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaselineTargets(pub [u64; 7]);

impl Default for BaselineTargets {
    fn default() -> Self {
        Self([102_325, 405_120, 418_960, 421_470, 417_230, 394_650, 163_050])
    }
}

impl BaselineTargets {
    pub fn target(&self, day: Weekday) -> u64 {
        self.0[day.num_days_from_sunday() as usize]
    }

    /// `trunc(riders / target * 100)`, computed in integers so that e.g.
    /// a ratio of 0.999 yields 0 and never rounds up.
    pub fn percent(&self, day: Weekday, riders: u64) -> Option<i32> {
        let target = self.target(day);
        if target == 0 {
            return None;
        }
        let pct = riders.checked_mul(100)? / target;
        i32::try_from(pct).ok()
    }
}
