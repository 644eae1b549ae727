//! Student registration: form validation and the persisted registration
//! mapping.

use std::collections::HashMap;

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::config::CatalogConfig;
use crate::domain::{AttendanceStatus, SrCode, StudentRecord};
use crate::storage::{KeyValueStore, StorageError, REGISTRATIONS_KEY};

/// Validation failures, in the order they are checked.
///
/// The display strings are the inline messages shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("Invalid SR Code. Format: XX-XXXXX (e.g., 21-12345)")]
    InvalidCode,
    #[error("Please enter your full name")]
    MissingName,
    #[error("Please select a department")]
    MissingDepartment,
    #[error("Please select a section")]
    MissingSection,
    #[error("SR Code already registered")]
    AlreadyRegistered,
}

/// Raw registration form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub code: String,
    pub name: String,
    pub department: String,
    pub section: String,
}

impl RegistrationForm {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<String>,
        section: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            department: department.into(),
            section: section.into(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// In-memory `code -> record` mapping, synchronized to a [`KeyValueStore`].
pub struct RegistrationStore {
    records: HashMap<SrCode, StudentRecord>,
    backend: Box<dyn KeyValueStore>,
}

impl RegistrationStore {
    /// Load the mapping from `backend`.
    ///
    /// A missing entry yields an empty store. An unreadable or corrupt
    /// entry is logged and also yields an empty store; it is overwritten on
    /// the next successful registration.
    pub fn load(backend: Box<dyn KeyValueStore>) -> Self {
        let records = match backend.get(REGISTRATIONS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<HashMap<SrCode, StudentRecord>>(&raw) {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding unreadable registration mapping");
                    HashMap::new()
                }
            },
            Ok(None) => HashMap::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load registrations");
                HashMap::new()
            }
        };
        tracing::info!(count = records.len(), "Registrations loaded");
        Self { records, backend }
    }

    pub fn get(&self, code: &SrCode) -> Option<&StudentRecord> {
        self.records.get(code)
    }

    pub fn contains(&self, code: &SrCode) -> bool {
        self.records.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validate `form` and insert a new record.
    ///
    /// Checks run in a fixed order and stop at the first failure; on failure
    /// nothing is mutated. On success the mapping is persisted. A persist
    /// failure is logged and the in-memory record is kept.
    pub fn register(
        &mut self,
        form: &RegistrationForm,
        catalog: &CatalogConfig,
        now: DateTime<Local>,
    ) -> Result<StudentRecord, RegistrationError> {
        let code = SrCode::parse(form.code.trim()).map_err(|_| RegistrationError::InvalidCode)?;

        let name = form.name.trim();
        if name.is_empty() {
            return Err(RegistrationError::MissingName);
        }
        let department = form.department.trim();
        if !catalog.has_department(department) {
            return Err(RegistrationError::MissingDepartment);
        }
        let section = form.section.trim();
        if !catalog.has_section(section) {
            return Err(RegistrationError::MissingSection);
        }
        if self.records.contains_key(&code) {
            return Err(RegistrationError::AlreadyRegistered);
        }

        let record = StudentRecord {
            sr_code: code.clone(),
            name: name.to_string(),
            department: department.to_string(),
            section: section.to_string(),
            subjects: Vec::new(),
            attendance: AttendanceStatus::OnTime,
            registered_at: Some(now.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()),
        };
        self.records.insert(code.clone(), record.clone());
        tracing::info!(code = %code, "Student registered");

        if let Err(e) = self.persist() {
            tracing::warn!(code = %code, error = %e, "Failed to persist registrations");
        }
        Ok(record)
    }

    /// Write the whole mapping to the backend.
    pub fn persist(&self) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(&self.records)?;
        self.backend.set(REGISTRATIONS_KEY, &encoded)
    }
}
