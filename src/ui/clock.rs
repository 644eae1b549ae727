//! Header clock refreshed by the 1 Hz tick.

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClockDisplay {
    pub time: String,
    pub date: String,
}

impl ClockDisplay {
    pub fn at(now: DateTime<Local>) -> Self {
        Self {
            time: now.format("%H:%M:%S").to_string(),
            date: now.format("%A, %B %-d, %Y").to_string(),
        }
    }
}
