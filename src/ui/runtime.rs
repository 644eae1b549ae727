use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncRead;
use tokio::task::JoinHandle;

use crate::camera::Camera;
use crate::ui::app::{App, Command, TimerEvent};
use crate::ui::events::{
    spawn_input, spawn_signal_listener, spawn_ticker, AppEvent, EventHandler, EventSender,
};
use crate::ui::input::{handle_command, UserCommand};
use crate::ui::render::draw;
use crate::ui::timers::{fire_after, SessionTimers};

const TICK_RATE: Duration = Duration::from_secs(1);

/// Single-threaded event loop around an [`App`].
///
/// Handlers run to completion. Camera requests and timers run as spawned
/// tasks and report back through the event channel.
pub struct Runtime {
    app: App,
    camera: Arc<dyn Camera>,
    events: EventHandler,
    timers: SessionTimers,
    notice_dismiss: Option<JoinHandle<()>>,
    camera_requests: Vec<JoinHandle<()>>,
}

impl Runtime {
    pub fn new(app: App, camera: Arc<dyn Camera>) -> Self {
        Self {
            app,
            camera,
            events: EventHandler::new(),
            timers: SessionTimers::new(),
            notice_dismiss: None,
            camera_requests: Vec::new(),
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    pub fn timers(&self) -> &SessionTimers {
        &self.timers
    }

    pub fn sender(&self) -> EventSender {
        self.events.sender()
    }

    /// Run until quit, EOF or a shutdown signal, then release resources and
    /// hand the app back.
    pub async fn run<R>(mut self, input: R, out: &mut dyn Write) -> io::Result<App>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let tasks = [
            spawn_input(input, self.sender()),
            spawn_ticker(TICK_RATE, self.sender()),
            spawn_signal_listener(self.sender()),
        ];

        self.app.on_tick();
        draw(out, &self.app)?;
        out.flush()?;

        while !self.app.should_quit() {
            let Some(event) = self.events.next().await else {
                break;
            };
            self.handle_event(event, out)?;
            out.flush()?;
        }

        for task in tasks {
            task.abort();
        }
        Ok(self.finish().await)
    }

    /// Wait for the next event and handle it.
    pub async fn step(&mut self, out: &mut dyn Write) -> io::Result<bool> {
        match self.events.next().await {
            Some(event) => {
                self.handle_event(event, out)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Handle every event already queued, without waiting.
    pub fn drain(&mut self, out: &mut dyn Write) -> io::Result<usize> {
        let mut handled = 0;
        while let Some(event) = self.events.try_next() {
            self.handle_event(event, out)?;
            handled += 1;
        }
        Ok(handled)
    }

    pub fn handle_line(&mut self, line: &str, out: &mut dyn Write) -> io::Result<()> {
        match UserCommand::parse(line) {
            Ok(Some(command)) => {
                let commands = handle_command(&mut self.app, command);
                self.apply(commands);
                if !self.app.should_quit() {
                    draw(out, &self.app)?;
                }
            }
            Ok(None) => {}
            Err(err) => writeln!(out, "Error: {}", err)?,
        }
        self.flush_notices(out)
    }

    pub fn handle_event(&mut self, event: AppEvent, out: &mut dyn Write) -> io::Result<()> {
        match event {
            AppEvent::Input(line) => return self.handle_line(&line, out),
            AppEvent::InputClosed | AppEvent::Shutdown => {
                tracing::info!("Shutting down");
                self.app.request_quit();
            }
            AppEvent::Camera {
                flow,
                ticket,
                result,
            } => {
                let commands = self.app.on_camera_result(flow, ticket, result);
                self.apply(commands);
            }
            AppEvent::Timer(timer) => {
                let commands = self.app.on_timer(timer);
                self.apply(commands);
                if matches!(timer, TimerEvent::Expiry { .. }) && !self.app.session().is_logged_in()
                {
                    draw(out, &self.app)?;
                }
            }
            AppEvent::Tick => self.app.on_tick(),
        }
        self.flush_notices(out)
    }

    fn flush_notices(&mut self, out: &mut dyn Write) -> io::Result<()> {
        for notice in self.app.take_notices() {
            writeln!(out, ">> {}", notice)?;
        }
        Ok(())
    }

    fn apply(&mut self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::RequestCamera { flow, ticket } => {
                    let camera = Arc::clone(&self.camera);
                    let tx = self.sender();
                    self.camera_requests.retain(|task| !task.is_finished());
                    self.camera_requests.push(tokio::spawn(async move {
                        let result = camera.request_video();
                        let _ = tx.send(AppEvent::Camera {
                            flow,
                            ticket,
                            result,
                        });
                    }));
                }
                Command::ArmSessionTimers {
                    epoch,
                    warning_after,
                    expire_after,
                    seconds_remaining,
                } => {
                    let tx = self.sender();
                    self.timers
                        .arm(&tx, epoch, warning_after, expire_after, seconds_remaining);
                }
                Command::CancelSessionTimers => self.timers.cancel(),
                Command::ScheduleNoticeDismiss { id, after } => {
                    if let Some(previous) = self.notice_dismiss.take() {
                        previous.abort();
                    }
                    self.notice_dismiss = Some(fire_after(
                        self.sender(),
                        after,
                        TimerEvent::NoticeDismiss { id },
                    ));
                }
            }
        }
    }

    /// Release cameras, stop timers and return the app.
    ///
    /// Outstanding camera requests are awaited so that a grant still in
    /// flight is stopped rather than dropped live.
    pub async fn finish(mut self) -> App {
        let commands = self.app.shutdown();
        self.apply(commands);
        if let Some(task) = self.notice_dismiss.take() {
            task.abort();
        }
        for task in std::mem::take(&mut self.camera_requests) {
            let _ = task.await;
        }
        while let Some(event) = self.events.try_next() {
            if let AppEvent::Camera {
                flow,
                ticket,
                result,
            } = event
            {
                self.app.on_camera_result(flow, ticket, result);
            }
        }
        self.app
    }
}
