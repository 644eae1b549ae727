//! Profile authentication and inactivity session feature module.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Session phase (LoggedOut → AwaitingCamera → LoggedIn) and timer epoch
//! - `intent.rs` - Login steps, activity, timer firings, logout
//! - `reducer.rs` - State transitions; camera and timer work is returned as effects
//!
//! Timers are keyed by epoch. Every arm, and every logout, moves to a new
//! epoch, so a firing from an earlier epoch is ignored.

mod intent;
mod reducer;
mod state;

pub use intent::SessionIntent;
pub use reducer::{LogoutReason, SessionEffect, SessionError, SessionReducer};
pub use state::{ActiveSession, SessionPhase, SessionState};
