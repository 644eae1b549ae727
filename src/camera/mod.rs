//! Camera collaborator and per-flow handle slots.
//!
//! Handles are released manually: nothing stops a stream on drop, so every
//! exit path from a view that opened one must go through
//! [`CameraSlot::release`].

mod simulated;
mod slot;

use std::fmt;

use thiserror::Error;

pub use simulated::{CameraStats, SimulatedCamera};
pub use slot::CameraSlot;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    /// The user or platform refused access.
    #[error("{0}")]
    Denied(String),
}

/// A live video stream. `stop` must be called exactly once.
pub trait VideoStream: Send {
    fn stop(&mut self);
}

/// Grants video streams.
pub trait Camera: Send + Sync {
    fn request_video(&self) -> Result<Box<dyn VideoStream>, CameraError>;
}

/// Which view owns a camera handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraFlow {
    Scan,
    Login,
}

impl fmt::Display for CameraFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scan => f.write_str("scan"),
            Self::Login => f.write_str("login"),
        }
    }
}
