//! Derived calendar event types.
//!
//! A [`CalendarEvent`] is produced per qualifying source row at sync time and
//! never persisted. [`EventStart`] models the two shapes a source date value
//! can take: a specific instant or a whole day.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::reminder::ReminderOffset;

/// When a calendar event starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum EventStart {
    /// A specific instant, stored in UTC.
    DateTime(DateTime<Utc>),
    /// An all-day date with no specific time.
    Day(NaiveDate),
}

impl EventStart {
    /// Creates an event start from a UTC instant.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }

    /// Creates an all-day event start.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::Day(date)
    }

    /// Returns true for all-day starts.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::Day(_))
    }

    /// Converts to a UTC instant for comparison; all-day starts compare at
    /// midnight UTC.
    pub fn to_utc_datetime(&self) -> DateTime<Utc> {
        match self {
            Self::DateTime(dt) => *dt,
            Self::Day(date) => date.and_hms_opt(0, 0, 0).expect("valid time").and_utc(),
        }
    }

    /// Returns the date portion of this start.
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::DateTime(dt) => dt.date_naive(),
            Self::Day(date) => *date,
        }
    }
}

impl PartialOrd for EventStart {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventStart {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_utc_datetime().cmp(&other.to_utc_datetime())
    }
}

/// A calendar event derived from one source row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Event title rendered from the mapped title property.
    pub title: String,
    /// Event start from the mapped date property.
    pub start: EventStart,
    /// Description rendered from the mapped description property, if any.
    pub description: Option<String>,
    /// Normalized reminder lead times, in configuration order.
    pub reminders: Vec<ReminderOffset>,
}

impl CalendarEvent {
    /// Creates an event with a title and start, no description or reminders.
    pub fn new(title: impl Into<String>, start: EventStart) -> Self {
        Self {
            title: title.into(),
            start,
            description: None,
            reminders: Vec::new(),
        }
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the reminder list.
    pub fn with_reminders(mut self, reminders: Vec<ReminderOffset>) -> Self {
        self.reminders = reminders;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn all_day_compares_at_midnight() {
        let day = EventStart::from_date(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
        let morning =
            EventStart::from_utc(Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap());
        assert!(day < morning);
        assert_eq!(day.date(), morning.date());
    }

    #[test]
    fn start_kind_predicates() {
        let day = EventStart::from_date(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
        let instant = EventStart::from_utc(Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap());
        assert!(day.is_all_day());
        assert!(!instant.is_all_day());
    }

    #[test]
    fn event_builder() {
        let start = EventStart::from_utc(Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap());
        let event = CalendarEvent::new("Launch review", start)
            .with_description("Q1 launch checklist")
            .with_reminders(vec![ReminderOffset::minutes(30)]);

        assert_eq!(event.title, "Launch review");
        assert_eq!(event.description.as_deref(), Some("Q1 launch checklist"));
        assert_eq!(event.reminders.len(), 1);
    }
}
