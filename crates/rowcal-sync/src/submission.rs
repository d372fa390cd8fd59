//! Configuration submission: the payload an operator sends after choosing
//! field mappings and reminder rules.
//!
//! Mirrors the configuration form: the three mapped property ids, the raw
//! reminder list, the source database id, and the existing config id when
//! editing. Validation reports the first offending field.

use serde::{Deserialize, Serialize};

use rowcal_core::{ReminderOffset, ReminderSpec, normalize_reminders};

use crate::error::{SyncError, SyncResult};

/// A submitted calendar configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSubmission {
    /// The source database being mapped.
    pub database_id: String,
    /// Existing configuration id when editing; absent when creating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_id: Option<String>,
    /// Property mapped to the event title.
    pub title_property_id: String,
    /// Property mapped to the event start date.
    pub date_property_id: String,
    /// Property mapped to the event description.
    pub description_property_id: String,
    /// Raw reminder rules; may be empty.
    #[serde(default)]
    pub reminders: Vec<ReminderSpec>,
}

impl ConfigSubmission {
    /// Creates a submission for a new configuration.
    pub fn new(
        database_id: impl Into<String>,
        title_property_id: impl Into<String>,
        date_property_id: impl Into<String>,
        description_property_id: impl Into<String>,
    ) -> Self {
        Self {
            database_id: database_id.into(),
            config_id: None,
            title_property_id: title_property_id.into(),
            date_property_id: date_property_id.into(),
            description_property_id: description_property_id.into(),
            reminders: Vec::new(),
        }
    }

    /// Builder method to target an existing configuration.
    pub fn with_config_id(mut self, config_id: impl Into<String>) -> Self {
        self.config_id = Some(config_id.into());
        self
    }

    /// Builder method to set the reminder rules.
    pub fn with_reminders(mut self, reminders: Vec<ReminderSpec>) -> Self {
        self.reminders = reminders;
        self
    }

    /// Validates the submission shape and normalizes its reminders.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Validation`] naming the offending field: any
    /// empty required id, or a malformed reminder rule.
    pub fn validate(&self) -> SyncResult<Vec<ReminderOffset>> {
        if self.database_id.trim().is_empty() {
            return Err(SyncError::validation("database_id", "must not be empty"));
        }
        if self.title_property_id.trim().is_empty() {
            return Err(SyncError::validation(
                "title_property_id",
                "must not be empty",
            ));
        }
        if self.date_property_id.trim().is_empty() {
            return Err(SyncError::validation(
                "date_property_id",
                "must not be empty",
            ));
        }
        if self.description_property_id.trim().is_empty() {
            return Err(SyncError::validation(
                "description_property_id",
                "must not be empty",
            ));
        }

        Ok(normalize_reminders(&self.reminders)?)
    }
}
