//! State for the session state machine.

use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::domain::{SrCode, StudentRecord};
use crate::ui::mvi::UiState;

/// A logged-in profile session.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSession {
    pub user: StudentRecord,
    pub session_id: Uuid,
    pub logged_in_at: DateTime<Local>,
    /// Anchor for both inactivity timers.
    pub last_activity: DateTime<Local>,
    /// Seconds left, once the inactivity warning is showing.
    pub warning: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionPhase {
    #[default]
    LoggedOut,
    /// Code accepted, login camera requested or live.
    AwaitingCamera { code: SrCode },
    LoggedIn(ActiveSession),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub phase: SessionPhase,
    /// Current timer epoch. Only firings tagged with this value count.
    pub epoch: u64,
}

impl UiState for SessionState {}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self.phase, SessionPhase::LoggedIn(_))
    }

    pub fn is_awaiting_camera(&self) -> bool {
        matches!(self.phase, SessionPhase::AwaitingCamera { .. })
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        match &self.phase {
            SessionPhase::LoggedIn(session) => Some(session),
            _ => None,
        }
    }
}
