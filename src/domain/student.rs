use serde::{Deserialize, Serialize};

use super::attendance::AttendanceStatus;
use super::code::SrCode;

/// Selected user role on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    None,
    Student,
    Teacher,
}

impl Role {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Self::Student),
            "teacher" => Some(Self::Teacher),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// A known student, either from the static directory or from registration.
///
/// Field names serialize in camelCase so the persisted mapping stays
/// readable by kiosks that already wrote `registeredStudents` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub sr_code: SrCode,
    pub name: String,
    pub department: String,
    pub section: String,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub attendance: AttendanceStatus,
    /// Local time of registration, absent for directory entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<String>,
}
