pub mod app;
pub mod clock;
pub mod events;
pub mod input;
pub mod mvi;
pub mod navigation;
pub mod render;
pub mod roster;
pub mod runtime;
pub mod scan;
pub mod session;
pub mod timers;
