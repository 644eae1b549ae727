//! Session and notice timers.

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::ui::app::TimerEvent;
use crate::ui::events::{AppEvent, EventSender};

/// The warning and expiry pair for the current session epoch.
///
/// Arming aborts the previous pair first, so at most one of each is
/// pending. A firing that slips through an abort still carries its old
/// epoch and is ignored by the session reducer.
#[derive(Default)]
pub struct SessionTimers {
    warning: Option<JoinHandle<()>>,
    expiry: Option<JoinHandle<()>>,
}

impl SessionTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(
        &mut self,
        tx: &EventSender,
        epoch: u64,
        warning_after: Duration,
        expire_after: Duration,
        seconds_remaining: u64,
    ) {
        self.cancel();
        tracing::debug!(epoch, ?warning_after, ?expire_after, "Arming session timers");
        self.warning = Some(fire_after(
            tx.clone(),
            warning_after,
            TimerEvent::Warning {
                epoch,
                seconds_remaining,
            },
        ));
        self.expiry = Some(fire_after(tx.clone(), expire_after, TimerEvent::Expiry { epoch }));
    }

    pub fn cancel(&mut self) {
        for handle in [self.warning.take(), self.expiry.take()].into_iter().flatten() {
            handle.abort();
        }
    }

    /// Timers armed and not yet fired or aborted.
    pub fn pending(&self) -> usize {
        [&self.warning, &self.expiry]
            .into_iter()
            .flatten()
            .filter(|h| !h.is_finished())
            .count()
    }
}

impl Drop for SessionTimers {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub fn fire_after(tx: EventSender, after: Duration, event: TimerEvent) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        let _ = tx.send(AppEvent::Timer(event));
    })
}
