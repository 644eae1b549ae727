use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::camera::{CameraError, CameraFlow, VideoStream};
use crate::ui::app::TimerEvent;

pub enum AppEvent {
    /// One line of user input.
    Input(String),
    /// Input reached EOF.
    InputClosed,
    /// A camera request finished. Tagged with the slot ticket so a grant
    /// for an abandoned request is stopped instead of installed.
    Camera {
        flow: CameraFlow,
        ticket: u64,
        result: Result<Box<dyn VideoStream>, CameraError>,
    },
    Timer(TimerEvent),
    Tick,
    /// OS signal received (SIGTERM, SIGINT)
    Shutdown,
}

pub type EventSender = mpsc::UnboundedSender<AppEvent>;

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
    tx: EventSender,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { rx, tx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    /// Next queued event without waiting.
    pub fn try_next(&mut self) -> Option<AppEvent> {
        self.rx.try_recv().ok()
    }

    pub fn sender(&self) -> EventSender {
        self.tx.clone()
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Forward lines from `reader` until EOF or a read error.
pub fn spawn_input<R>(reader: R, tx: EventSender) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(AppEvent::Input(line)).is_err() {
                        return;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    tracing::warn!(error = %err, "Input read failed");
                    break;
                }
            }
        }
        let _ = tx.send(AppEvent::InputClosed);
    })
}

pub fn spawn_ticker(tick_rate: Duration, tx: EventSender) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick_rate);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if tx.send(AppEvent::Tick).is_err() {
                return;
            }
        }
    })
}

pub fn spawn_signal_listener(tx: EventSender) -> JoinHandle<()> {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let Ok(mut sigterm) = signal(SignalKind::terminate()) else {
                tracing::warn!("Failed to install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
                let _ = tx.send(AppEvent::Shutdown);
                return;
            };
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {},
                _ = sigterm.recv() => {},
            }
        }

        #[cfg(not(unix))]
        {
            let _ = tokio::signal::ctrl_c().await;
        }

        let _ = tx.send(AppEvent::Shutdown);
    })
}
