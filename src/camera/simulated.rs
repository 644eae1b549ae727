use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::{Camera, CameraError, VideoStream};

/// Counters shared by a [`SimulatedCamera`] and the streams it hands out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraStats {
    pub opened: u64,
    pub stopped: u64,
    /// `stop` calls on an already stopped stream.
    pub double_stops: u64,
}

impl CameraStats {
    pub fn live(&self) -> u64 {
        self.opened - self.stopped
    }
}

/// Stand-in camera with a grant/deny switch. Clones share the switch and
/// the counters.
#[derive(Debug, Clone, Default)]
pub struct SimulatedCamera {
    deny: Arc<AtomicBool>,
    stats: Arc<Mutex<CameraStats>>,
}

impl SimulatedCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn denying() -> Self {
        let camera = Self::new();
        camera.set_deny(true);
        camera
    }

    pub fn set_deny(&self, deny: bool) {
        self.deny.store(deny, Ordering::SeqCst);
    }

    pub fn stats(&self) -> CameraStats {
        *self.stats.lock()
    }
}

impl Camera for SimulatedCamera {
    fn request_video(&self) -> Result<Box<dyn VideoStream>, CameraError> {
        if self.deny.load(Ordering::SeqCst) {
            return Err(CameraError::Denied("Permission denied".to_string()));
        }
        self.stats.lock().opened += 1;
        Ok(Box::new(SimulatedStream {
            stats: Arc::clone(&self.stats),
            stopped: false,
        }))
    }
}

struct SimulatedStream {
    stats: Arc<Mutex<CameraStats>>,
    stopped: bool,
}

impl VideoStream for SimulatedStream {
    fn stop(&mut self) {
        let mut stats = self.stats.lock();
        if self.stopped {
            stats.double_stops += 1;
            return;
        }
        self.stopped = true;
        stats.stopped += 1;
    }
}
