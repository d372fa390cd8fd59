//! Core types: properties, field roles, reminders, events, feed fingerprints

pub mod config;
pub mod event;
pub mod fingerprint;
pub mod property;
pub mod reminder;
pub mod tracing;

pub use config::CalendarConfig;
pub use event::{CalendarEvent, EventStart};
pub use fingerprint::feed_fingerprint;
pub use property::{
    FieldCandidate, FieldRole, SemanticType, SourceProperty, candidates_for_role,
};
pub use reminder::{
    ReminderError, ReminderOffset, ReminderSpec, ReminderUnit, normalize_reminder,
    normalize_reminders,
};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
