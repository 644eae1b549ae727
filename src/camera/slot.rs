use super::{CameraFlow, VideoStream};

/// Owned slot for at most one live stream of a single flow.
///
/// Requests are asynchronous: [`CameraSlot::begin_request`] hands out a
/// ticket, and only the grant carrying the current ticket is installed.
/// A grant for an abandoned request is stopped on arrival.
pub struct CameraSlot {
    flow: CameraFlow,
    stream: Option<Box<dyn VideoStream>>,
    pending: Option<u64>,
    next_ticket: u64,
}

impl CameraSlot {
    pub fn new(flow: CameraFlow) -> Self {
        Self {
            flow,
            stream: None,
            pending: None,
            next_ticket: 0,
        }
    }

    pub fn flow(&self) -> CameraFlow {
        self.flow
    }

    pub fn is_live(&self) -> bool {
        self.stream.is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Release any current stream and start a new request.
    pub fn begin_request(&mut self) -> u64 {
        self.release();
        self.next_ticket += 1;
        self.pending = Some(self.next_ticket);
        self.next_ticket
    }

    /// Install a granted stream. Returns false (and stops the stream) when
    /// `ticket` is not the outstanding request.
    pub fn install(&mut self, ticket: u64, mut stream: Box<dyn VideoStream>) -> bool {
        if self.pending != Some(ticket) {
            tracing::debug!(flow = %self.flow, ticket, "Stopping stale camera grant");
            stream.stop();
            return false;
        }
        self.pending = None;
        if let Some(mut previous) = self.stream.take() {
            previous.stop();
        }
        self.stream = Some(stream);
        true
    }

    /// Resolve a failed request. Returns true if `ticket` was outstanding.
    pub fn fail(&mut self, ticket: u64) -> bool {
        if self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Stop the live stream, if any, and forget any outstanding request.
    /// Returns true if a stream was stopped.
    pub fn release(&mut self) -> bool {
        self.pending = None;
        match self.stream.take() {
            Some(mut stream) => {
                stream.stop();
                tracing::debug!(flow = %self.flow, "Camera released");
                true
            }
            None => false,
        }
    }
}
