//! State for the check-in flow.

use crate::domain::{AttendanceStatus, SrCode};
use crate::ui::mvi::UiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanPhase {
    #[default]
    Idle,
    AwaitingCamera,
    /// Preview is streaming.
    Live,
}

/// Timed success notification shown after a match.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckInNotice {
    pub id: u64,
    pub name: String,
    pub sr_code: SrCode,
    /// Wall-clock time of the capture, e.g. `8:59:00 AM`.
    pub time: String,
    pub status: AttendanceStatus,
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanState {
    pub phase: ScanPhase,
    pub notice: Option<CheckInNotice>,
    /// Id of the most recent notice.
    pub last_notice_id: u64,
}

impl UiState for ScanState {}

impl ScanState {
    pub fn is_live(&self) -> bool {
        self.phase == ScanPhase::Live
    }
}
