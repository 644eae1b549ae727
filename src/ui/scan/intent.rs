//! Intents for the check-in flow.

use chrono::{DateTime, Local};

use crate::domain::{LateCutoff, StudentRecord};
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum ScanIntent {
    /// Validate the selection and request the scan camera.
    Start { department: String, section: String },

    CameraGranted,

    CameraDenied { reason: String },

    /// Simulated capture. `matched` is the first directory record for the
    /// selection, looked up by the caller.
    Capture {
        department: String,
        section: String,
        matched: Option<StudentRecord>,
        at: DateTime<Local>,
        cutoff: LateCutoff,
    },

    /// Hide the success notice. `Some(id)` only hides that notice, so a
    /// late auto-dismiss cannot hide a newer one.
    DismissNotice { id: Option<u64> },

    /// The scan view was left.
    Reset,
}

impl Intent for ScanIntent {}
