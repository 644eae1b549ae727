//! Intents for the session state machine.

use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::domain::StudentRecord;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum SessionIntent {
    /// Validate the code and request the login camera.
    StartLogin { code: String },

    /// The login camera request failed.
    CameraDenied { reason: String },

    /// The profile view was left before login completed.
    AbandonLogin,

    /// Simulated face match. `identity` is the lookup result for `code`
    /// (registrations first, then the directory); `None` when the code is
    /// invalid or unknown.
    LoginWithFace {
        code: String,
        identity: Option<StudentRecord>,
        session_id: Uuid,
        now: DateTime<Local>,
    },

    /// Pointer movement, key press or click.
    Activity { now: DateTime<Local> },

    /// Warning timer for `epoch` fired.
    WarningElapsed { epoch: u64, seconds_remaining: u64 },

    /// Expiry timer for `epoch` fired.
    ExpiryElapsed { epoch: u64 },

    /// Explicit logout.
    Logout,
}

impl Intent for SessionIntent {}
