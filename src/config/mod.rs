//! TOML configuration: catalog, session timing, check-in policy, storage
//! location and the static directory.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{CatalogConfig, CheckInConfig, Config, SessionConfig, StorageConfig};
