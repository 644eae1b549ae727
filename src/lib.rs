pub mod camera;
pub mod config;
pub mod directory;
pub mod domain;
pub mod logging;
pub mod registration;
pub mod storage;
pub mod ui;
