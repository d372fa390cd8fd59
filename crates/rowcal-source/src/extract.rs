//! Row to calendar-event field extraction.
//!
//! This module applies a configuration's field selection to raw rows,
//! producing [`CalendarEvent`]s:
//! 1. The date property supplies the event start; rows without a usable
//!    date value are skipped entirely.
//! 2. The title property renders to text, falling back to a placeholder.
//! 3. The description property renders to text if it has any.
//!
//! Reminders are configuration-level, so the same normalized offsets are
//! attached to every event.

use tracing::trace;

use rowcal_core::{CalendarEvent, ReminderOffset};

use crate::row::RawRow;

/// Title used when the mapped title property has no renderable value.
const UNTITLED: &str = "(untitled)";

/// The property ids a configuration maps onto calendar fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection {
    /// Property rendered as the event title.
    pub title_property_id: String,
    /// Property supplying the event start; rows missing it are skipped.
    pub date_property_id: String,
    /// Property rendered as the event description.
    pub description_property_id: String,
}

impl FieldSelection {
    /// Creates a field selection from the three mapped property ids.
    pub fn new(
        title_property_id: impl Into<String>,
        date_property_id: impl Into<String>,
        description_property_id: impl Into<String>,
    ) -> Self {
        Self {
            title_property_id: title_property_id.into(),
            date_property_id: date_property_id.into(),
            description_property_id: description_property_id.into(),
        }
    }
}

/// Extracts a calendar event from one row, without reminders.
///
/// Returns `None` if the row has no usable date value for the selected date
/// property. A missing title renders as a placeholder rather than dropping
/// the row.
pub fn extract_event(row: &RawRow, selection: &FieldSelection) -> Option<CalendarEvent> {
    let start = row
        .get(&selection.date_property_id)
        .and_then(|value| value.as_start());

    let Some(start) = start else {
        trace!(row_id = %row.id, "Skipping row without a date value");
        return None;
    };

    let title = row
        .get(&selection.title_property_id)
        .and_then(|value| value.as_text())
        .unwrap_or_else(|| UNTITLED.to_string());

    let mut event = CalendarEvent::new(title, start);

    if let Some(description) = row
        .get(&selection.description_property_id)
        .and_then(|value| value.as_text())
    {
        event = event.with_description(description);
    }

    Some(event)
}

/// Extracts calendar events from rows in source order, attaching the
/// configuration's reminder offsets to each.
pub fn extract_events(
    rows: &[RawRow],
    selection: &FieldSelection,
    reminders: &[ReminderOffset],
) -> Vec<CalendarEvent> {
    rows.iter()
        .filter_map(|row| extract_event(row, selection))
        .map(|event| event.with_reminders(reminders.to_vec()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::RawValue;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rowcal_core::EventStart;

    fn selection() -> FieldSelection {
        FieldSelection::new("p-title", "p-date", "p-desc")
    }

    fn dated_row(id: &str) -> RawRow {
        RawRow::new(id)
            .with_property("p-title", RawValue::Title("Sprint demo".into()))
            .with_property(
                "p-date",
                RawValue::Date(EventStart::from_date(
                    NaiveDate::from_ymd_opt(2026, 6, 15).unwrap(),
                )),
            )
            .with_property("p-desc", RawValue::RichText("Showcase of sprint 12".into()))
    }

    mod single_row {
        use super::*;

        #[test]
        fn extracts_all_three_fields() {
            let event = extract_event(&dated_row("row-1"), &selection()).unwrap();
            assert_eq!(event.title, "Sprint demo");
            assert!(event.start.is_all_day());
            assert_eq!(event.description.as_deref(), Some("Showcase of sprint 12"));
            assert!(event.reminders.is_empty());
        }

        #[test]
        fn skips_row_without_date_value() {
            let row = RawRow::new("row-2")
                .with_property("p-title", RawValue::Title("No date".into()))
                .with_property("p-date", RawValue::Empty);
            assert!(extract_event(&row, &selection()).is_none());
        }

        #[test]
        fn skips_row_missing_date_property() {
            let row = RawRow::new("row-3").with_property("p-title", RawValue::Title("X".into()));
            assert!(extract_event(&row, &selection()).is_none());
        }

        #[test]
        fn falls_back_to_placeholder_title() {
            let row = RawRow::new("row-4").with_property(
                "p-date",
                RawValue::Date(EventStart::from_utc(
                    Utc.with_ymd_and_hms(2026, 6, 15, 10, 0, 0).unwrap(),
                )),
            );
            let event = extract_event(&row, &selection()).unwrap();
            assert_eq!(event.title, UNTITLED);
            assert!(event.description.is_none());
        }

        #[test]
        fn renders_number_title() {
            let row = dated_row("row-5").with_property("p-title", RawValue::Number(7.0));
            let event = extract_event(&row, &selection()).unwrap();
            assert_eq!(event.title, "7");
        }

        #[test]
        fn empty_description_is_dropped() {
            let row = dated_row("row-6").with_property("p-desc", RawValue::RichText(String::new()));
            let event = extract_event(&row, &selection()).unwrap();
            assert!(event.description.is_none());
        }
    }

    mod batches {
        use super::*;
        use rowcal_core::ReminderOffset;

        #[test]
        fn attaches_reminders_to_every_event() {
            let rows = vec![dated_row("row-1"), dated_row("row-2")];
            let reminders = vec![ReminderOffset::minutes(30), ReminderOffset::minutes(60)];
            let events = extract_events(&rows, &selection(), &reminders);

            assert_eq!(events.len(), 2);
            for event in &events {
                assert_eq!(event.reminders, reminders);
            }
        }

        #[test]
        fn preserves_source_order_and_skips_undated() {
            let rows = vec![
                dated_row("row-1"),
                RawRow::new("row-2"),
                dated_row("row-3"),
            ];
            let events = extract_events(&rows, &selection(), &[]);
            assert_eq!(events.len(), 2);
        }
    }
}
