//! Model-View-Intent (MVI) architecture primitives.
//!
//! This module provides base traits for implementing unidirectional
//! data flow in the kiosk controller.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑          │
//!    │          └──→ Effects ──→ App / Runtime
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: Immutable representation of UI state
//! - **Intent**: User actions or system events
//! - **Reducer**: Pure function that transforms state based on intents
//! - **Effects**: Side effects a reducer asks its caller to perform

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::{EffectReducer, Reducer};
pub use state::UiState;
