//! Screen navigation feature module.
//!
//! Tracks which view is active, the selected role, and the single inline
//! error shown next to the active form.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Active view, role and inline error
//! - `intent.rs` - Role selection, navigation, back, error display
//! - `reducer.rs` - State transitions plus camera-release effects

mod intent;
mod reducer;
mod state;

pub use intent::NavigationIntent;
pub use reducer::{NavigationEffect, NavigationReducer};
pub use state::{View, ViewState};
