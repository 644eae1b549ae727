//! Attendance status, the late cutoff, and the in-memory check-in log.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::code::SrCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[default]
    #[serde(rename = "ON TIME")]
    OnTime,
    #[serde(rename = "LATE")]
    Late,
    #[serde(rename = "ABSENT")]
    Absent,
}

impl AttendanceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::OnTime => "ON TIME",
            Self::Late => "LATE",
            Self::Absent => "ABSENT",
        }
    }

    /// Parse a status name as typed by a teacher. `present` means on time.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "present" | "on-time" | "ontime" | "on_time" => Some(Self::OnTime),
            "late" => Some(Self::Late),
            "absent" => Some(Self::Absent),
            _ => None,
        }
    }

    /// Whether the student was there at all.
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid late cutoff '{0}', expected HH:MM")]
pub struct InvalidCutoff(pub String);

/// Wall-clock minute after which a check-in counts as late.
///
/// Resolution is whole minutes: with a 09:00 cutoff, 09:00:59 is still on
/// time and 09:01:00 is late.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LateCutoff {
    hour: u32,
    minute: u32,
}

impl LateCutoff {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    pub fn parse(s: &str) -> Result<Self, InvalidCutoff> {
        let time = NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map_err(|_| InvalidCutoff(s.to_string()))?;
        Ok(Self {
            hour: time.hour(),
            minute: time.minute(),
        })
    }

    pub fn classify(&self, time: NaiveTime) -> AttendanceStatus {
        let late = time.hour() > self.hour
            || (time.hour() == self.hour && time.minute() > self.minute);
        if late {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::OnTime
        }
    }
}

impl Default for LateCutoff {
    fn default() -> Self {
        Self { hour: 9, minute: 0 }
    }
}

/// How a check-in entered the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkedBy {
    FaceScan,
    /// Set by hand from the roster. Overrides any earlier entry that day.
    Teacher,
    /// Absence filled in when a teacher ends the attendance session.
    System,
}

impl fmt::Display for MarkedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FaceScan => f.write_str("face scan"),
            Self::Teacher => f.write_str("teacher"),
            Self::System => f.write_str("system"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckIn {
    pub sr_code: SrCode,
    pub name: String,
    pub section: String,
    /// When the entry was made. Also the day it belongs to.
    pub at: DateTime<Local>,
    pub status: AttendanceStatus,
    pub marked_by: MarkedBy,
}

impl CheckIn {
    /// Time of arrival, formatted for display. Absences have none.
    pub fn time_in(&self) -> Option<String> {
        self.status
            .is_present()
            .then(|| self.at.format("%-I:%M:%S %p").to_string())
    }
}

/// Check-ins recorded during this process. Not persisted.
#[derive(Debug, Clone, Default)]
pub struct AttendanceLog {
    entries: Vec<CheckIn>,
}

impl AttendanceLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a check-in. A repeat check-in on the same day keeps the first one.
    pub fn record(&mut self, entry: CheckIn) -> bool {
        let day = entry.at.date_naive();
        if self.on(&entry.sr_code, day).is_some() {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Record `entry`, replacing any entry for the same student that day.
    pub fn mark(&mut self, entry: CheckIn) {
        let day = entry.at.date_naive();
        match self
            .entries
            .iter_mut()
            .find(|e| e.sr_code == entry.sr_code && e.at.date_naive() == day)
        {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// The check-in for `code` on `day`, if any.
    pub fn on(&self, code: &SrCode, day: NaiveDate) -> Option<&CheckIn> {
        self.entries
            .iter()
            .find(|e| &e.sr_code == code && e.at.date_naive() == day)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
