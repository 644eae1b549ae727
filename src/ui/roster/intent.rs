use crate::domain::CheckIn;
use crate::ui::mvi::Intent;

use super::state::{AttendanceDetail, RosterRow};

#[derive(Debug, Clone)]
pub enum RosterIntent {
    /// Show `students` for `section`. An empty section clears the grid.
    Load {
        section: String,
        students: Vec<RosterRow>,
    },
    /// A new log entry. Updates the matching row and an open modal for
    /// the same student; entries for other sections are ignored.
    Marked(CheckIn),
    /// The teacher closed attendance for the loaded section; every row
    /// nobody marked is now absent.
    SessionEnded(Vec<CheckIn>),
    /// Open the modal. `None` (unknown student) leaves it closed.
    Show(Option<AttendanceDetail>),
    CloseModal,
    /// Click outside the modal bounds.
    BackdropClick,
}

impl Intent for RosterIntent {}
