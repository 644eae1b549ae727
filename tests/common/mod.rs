//! Shared test utilities: a settable clock and camera helpers.

#![allow(dead_code, unused_imports)]

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use parking_lot::Mutex;
use rollcall::camera::{Camera, SimulatedCamera};
use rollcall::config::Config;
use rollcall::storage::MemoryStore;
use rollcall::ui::app::{App, Command};
use std::sync::Arc;
use std::time::Duration;

/// Clock that tests can set and advance.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn at_local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Arc<Self> {
        Arc::new(Self(Mutex::new(local(y, mo, d, h, mi, s).with_timezone(&Utc))))
    }

    pub fn set_local(&self, h: u32, mi: u32, s: u32) {
        let today = self.local();
        let next = Local
            .with_ymd_and_hms(
                chrono::Datelike::year(&today),
                chrono::Datelike::month(&today),
                chrono::Datelike::day(&today),
                h,
                mi,
                s,
            )
            .single()
            .expect("unambiguous local time");
        *self.0.lock() = next.with_timezone(&Utc);
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.0.lock();
        *now += chrono::Duration::from_std(by).expect("duration in range");
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock()
    }
}

pub fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .expect("unambiguous local time")
}

/// App over an in-memory store, with the clock at 2026-03-02 08:30.
pub struct Harness {
    pub app: App,
    pub store: MemoryStore,
    pub clock: Arc<MutableClock>,
    pub camera: SimulatedCamera,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let store = MemoryStore::new();
        let clock = MutableClock::at_local(2026, 3, 2, 8, 30, 0);
        let app = App::new(&config, Box::new(store.clone()), clock.clone())
            .expect("default config is valid");
        Self {
            app,
            store,
            clock,
            camera: SimulatedCamera::new(),
        }
    }

    /// Fulfil every camera request in `commands` right away and return the
    /// remaining commands.
    pub fn fulfil(&mut self, commands: Vec<Command>) -> Vec<Command> {
        let mut rest = Vec::new();
        for command in commands {
            match command {
                Command::RequestCamera { flow, ticket } => {
                    let result = self.camera.request_video();
                    rest.extend(self.app.on_camera_result(flow, ticket, result));
                }
                other => rest.push(other),
            }
        }
        rest
    }

    pub fn error(&self) -> Option<&str> {
        self.app.view().error.as_deref()
    }
}
