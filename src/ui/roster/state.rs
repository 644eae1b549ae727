use crate::domain::{AttendanceStatus, CheckIn, MarkedBy, SrCode, StudentRecord};
use crate::ui::mvi::UiState;

/// On-time, late and absent counts for the loaded section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionSummary {
    pub on_time: usize,
    pub late: usize,
    pub absent: usize,
}

impl SectionSummary {
    pub fn tally(statuses: impl IntoIterator<Item = AttendanceStatus>) -> Self {
        statuses
            .into_iter()
            .fold(Self::default(), |mut acc, status| {
                match status {
                    AttendanceStatus::OnTime => acc.on_time += 1,
                    AttendanceStatus::Late => acc.late += 1,
                    AttendanceStatus::Absent => acc.absent += 1,
                }
                acc
            })
    }
}

/// One student in the section grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterRow {
    pub student: StudentRecord,
    /// Today's logged status, else the directory default.
    pub status: AttendanceStatus,
    /// Who made today's entry. `None` until someone marks the student.
    pub marked_by: Option<MarkedBy>,
    pub time_in: Option<String>,
}

impl RosterRow {
    pub fn new(student: StudentRecord, today: Option<&CheckIn>) -> Self {
        match today {
            Some(entry) => Self {
                status: entry.status,
                marked_by: Some(entry.marked_by),
                time_in: entry.time_in(),
                student,
            },
            None => Self {
                status: student.attendance,
                marked_by: None,
                time_in: None,
                student,
            },
        }
    }

    pub fn is_marked(&self) -> bool {
        self.marked_by.is_some()
    }
}

/// Contents of the attendance modal.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceDetail {
    pub name: String,
    pub sr_code: SrCode,
    pub department: String,
    pub section: String,
    pub status: AttendanceStatus,
    pub subjects: Vec<String>,
    /// Check-in time if the student checked in today, else the current time.
    pub time: String,
    pub checked_in: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RosterState {
    pub section: Option<String>,
    pub students: Vec<RosterRow>,
    pub summary: SectionSummary,
    pub modal: Option<AttendanceDetail>,
}

impl UiState for RosterState {}

impl RosterState {
    pub fn is_modal_open(&self) -> bool {
        self.modal.is_some()
    }

    pub fn row(&self, code: &SrCode) -> Option<&RosterRow> {
        self.students.iter().find(|r| &r.student.sr_code == code)
    }

    /// Recount from the rows.
    pub(super) fn retally(mut self) -> Self {
        self.summary = SectionSummary::tally(self.students.iter().map(|r| r.status));
        self
    }
}
