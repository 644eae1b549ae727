//! Read-only student directory used for simulated face matching and the
//! teacher roster.

use crate::domain::{AttendanceStatus, SrCode, StudentRecord};

/// Ordered, read-only list of known students.
///
/// Order matters: [`StudentDirectory::first_match`] returns the first entry
/// in declared order, with no tie-break between students sharing a
/// department and section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentDirectory {
    records: Vec<StudentRecord>,
}

impl StudentDirectory {
    pub fn new(records: Vec<StudentRecord>) -> Self {
        Self { records }
    }

    /// The six demo students the kiosk ships with.
    pub fn builtin() -> Self {
        Self::new(builtin_records())
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find_by_code(&self, code: &str) -> Option<&StudentRecord> {
        self.records.iter().find(|r| r.sr_code.as_str() == code)
    }

    pub fn first_match(&self, department: &str, section: &str) -> Option<&StudentRecord> {
        self.records
            .iter()
            .find(|r| r.department == department && r.section == section)
    }

    pub fn in_section<'a>(&'a self, section: &'a str) -> impl Iterator<Item = &'a StudentRecord> {
        self.records.iter().filter(move |r| r.section == section)
    }
}

pub(crate) fn builtin_records() -> Vec<StudentRecord> {
    const BUILTIN: &[(&str, &str, &str, &str, &[&str], AttendanceStatus)] = &[
        ("John Smith", "21-00001", "CS", "A", &["Math 101", "Physics 101"], AttendanceStatus::OnTime),
        ("Maria Garcia", "21-00002", "CS", "A", &["Math 101", "Physics 101"], AttendanceStatus::OnTime),
        ("Ahmed Hassan", "21-00003", "CS", "B", &["Data Structures", "Database"], AttendanceStatus::Late),
        ("Sarah Lee", "21-00004", "EN", "A", &["Engineering Design", "Materials"], AttendanceStatus::OnTime),
        ("Carlos Lopez", "21-00005", "BUS", "C", &["Business Law", "Economics"], AttendanceStatus::OnTime),
        ("Emily Chen", "21-00006", "CS", "B", &["Data Structures", "Database"], AttendanceStatus::OnTime),
    ];

    BUILTIN
        .iter()
        .filter_map(|(name, code, department, section, subjects, attendance)| {
            Some(StudentRecord {
                sr_code: SrCode::parse(code).ok()?,
                name: name.to_string(),
                department: department.to_string(),
                section: section.to_string(),
                subjects: subjects.iter().map(|s| s.to_string()).collect(),
                attendance: *attendance,
                registered_at: None,
            })
        })
        .collect()
}
