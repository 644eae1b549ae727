//! Teacher roster feature module: section grid and attendance modal.

mod intent;
mod reducer;
mod state;

pub use intent::RosterIntent;
pub use reducer::{RosterError, RosterReducer};
pub use state::{AttendanceDetail, RosterRow, RosterState, SectionSummary};
