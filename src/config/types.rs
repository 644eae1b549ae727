use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::directory::builtin_records;
use crate::domain::StudentRecord;

/// Root configuration container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub check_in: CheckInConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    /// Static student directory, in match order.
    #[serde(default = "builtin_records")]
    pub directory: Vec<StudentRecord>,
}

/// Departments and sections offered by the registration and scan forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_departments")]
    pub departments: Vec<String>,
    #[serde(default = "default_sections")]
    pub sections: Vec<String>,
}

impl CatalogConfig {
    pub fn has_department(&self, department: &str) -> bool {
        self.departments.iter().any(|d| d == department)
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.iter().any(|s| s == section)
    }
}

/// Inactivity policy for the profile dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seconds of inactivity before the expiry warning (default: 150).
    #[serde(default = "default_warning_after")]
    pub warning_after_seconds: u64,
    /// Seconds of inactivity before forced logout (default: 180).
    #[serde(default = "default_expire_after")]
    pub expire_after_seconds: u64,
}

impl SessionConfig {
    pub fn warning_after(&self) -> Duration {
        Duration::from_secs(self.warning_after_seconds)
    }

    pub fn expire_after(&self) -> Duration {
        Duration::from_secs(self.expire_after_seconds)
    }

    /// Seconds left on the clock when the warning shows.
    pub fn warning_lead_seconds(&self) -> u64 {
        self.expire_after_seconds
            .saturating_sub(self.warning_after_seconds)
    }
}

/// Face-scan check-in settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInConfig {
    /// Check-ins strictly after this minute are late (default: "09:00").
    #[serde(default = "default_late_after")]
    pub late_after: String,
    /// Seconds the success notice stays up (default: 5).
    #[serde(default = "default_notice_seconds")]
    pub notice_seconds: u64,
}

impl CheckInConfig {
    pub fn notice_duration(&self) -> Duration {
        Duration::from_secs(self.notice_seconds)
    }
}

/// Where the registration mapping is persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file path (default: `<data dir>/rollcall/registrations.json`).
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolved_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => {
                let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
                data_dir.join("rollcall").join("registrations.json")
            }
        }
    }
}

fn default_departments() -> Vec<String> {
    vec!["CS".to_string(), "EN".to_string(), "BUS".to_string()]
}

fn default_sections() -> Vec<String> {
    vec!["A".to_string(), "B".to_string(), "C".to_string()]
}

fn default_warning_after() -> u64 {
    150
}

fn default_expire_after() -> u64 {
    180
}

fn default_late_after() -> String {
    "09:00".to_string()
}

fn default_notice_seconds() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            session: SessionConfig::default(),
            check_in: CheckInConfig::default(),
            storage: StorageConfig::default(),
            directory: builtin_records(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            departments: default_departments(),
            sections: default_sections(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            warning_after_seconds: default_warning_after(),
            expire_after_seconds: default_expire_after(),
        }
    }
}

impl Default for CheckInConfig {
    fn default() -> Self {
        Self {
            late_after: default_late_after(),
            notice_seconds: default_notice_seconds(),
        }
    }
}
