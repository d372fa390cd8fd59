//! Calendar configuration: the persisted mapping between one source database
//! and one calendar feed.
//!
//! One [`CalendarConfig`] exists per (owner, source database) pair. Reminder
//! offsets are stored inside the config value, so replacing them wholesale on
//! edit and cascading them on delete are both structural.

use serde::{Deserialize, Serialize};

use crate::reminder::ReminderOffset;

/// A user's calendar configuration for one source database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Store-assigned configuration identifier.
    pub id: String,
    /// The user who owns this configuration.
    pub owner_id: String,
    /// The source database this configuration maps.
    pub source_database_id: String,
    /// Property id mapped to the event title.
    pub title_property_id: String,
    /// Property id mapped to the event start date.
    pub date_property_id: String,
    /// Property id mapped to the event description.
    pub description_property_id: String,
    /// Normalized reminder lead times, replaced wholesale on every edit.
    pub reminder_offsets: Vec<ReminderOffset>,
    /// Fingerprint of the last published feed, if any.
    pub content_hash: Option<String>,
    /// Cached serialized feed matching `content_hash`, if any.
    pub cached_feed: Option<String>,
    /// Whether this is the user's designated primary configuration.
    pub is_primary: bool,
}

impl CalendarConfig {
    /// Creates a bare configuration with no field mappings.
    pub fn new(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        source_database_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            source_database_id: source_database_id.into(),
            title_property_id: String::new(),
            date_property_id: String::new(),
            description_property_id: String::new(),
            reminder_offsets: Vec::new(),
            content_hash: None,
            cached_feed: None,
            is_primary: false,
        }
    }

    /// Builder method to set the three field mappings.
    pub fn with_fields(
        mut self,
        title_property_id: impl Into<String>,
        date_property_id: impl Into<String>,
        description_property_id: impl Into<String>,
    ) -> Self {
        self.title_property_id = title_property_id.into();
        self.date_property_id = date_property_id.into();
        self.description_property_id = description_property_id.into();
        self
    }

    /// Builder method to set the reminder offsets.
    pub fn with_reminders(mut self, reminder_offsets: Vec<ReminderOffset>) -> Self {
        self.reminder_offsets = reminder_offsets;
        self
    }

    /// Builder method to set the primary flag.
    pub fn with_primary(mut self, is_primary: bool) -> Self {
        self.is_primary = is_primary;
        self
    }

    /// A configuration is usable for sync once its title and date fields
    /// are mapped.
    pub fn is_configured(&self) -> bool {
        !self.title_property_id.is_empty() && !self.date_property_id.is_empty()
    }

    /// Records a freshly published feed.
    pub fn record_feed(&mut self, content_hash: impl Into<String>, cached_feed: Option<String>) {
        self.content_hash = Some(content_hash.into());
        self.cached_feed = cached_feed;
    }

    /// Drops the published-feed state so the next sync regenerates.
    pub fn invalidate_feed(&mut self) {
        self.content_hash = None;
        self.cached_feed = None;
    }
}
