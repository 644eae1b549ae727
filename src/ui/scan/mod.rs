//! Simulated face-scan check-in feature module.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Camera phase (Idle → AwaitingCamera → Live) and the success notice
//! - `intent.rs` - Start, camera results, capture, notice dismissal
//! - `reducer.rs` - State transitions; camera, logging and dismissal are effects

mod intent;
mod reducer;
mod state;

pub use intent::ScanIntent;
pub use reducer::{ScanEffect, ScanError, ScanReducer};
pub use state::{CheckInNotice, ScanPhase, ScanState};
