//! Reminder specifications and lead-time normalization.
//!
//! Reminder rules arrive as heterogeneous `{duration, unit}` pairs. This
//! module normalizes them into [`ReminderOffset`] values measured in
//! minutes-before-event, the single unit the rest of the system schedules
//! against.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while normalizing reminder specifications.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReminderError {
    /// The duration was zero or negative.
    #[error("reminder duration must be a positive integer, got {0}")]
    NonPositiveDuration(i64),

    /// The unit label was not one of the recognized set.
    #[error("unrecognized reminder unit `{0}` (expected min, hour, or day)")]
    UnknownUnit(String),

    /// The resulting lead time does not fit the supported range.
    #[error("reminder lead time of {duration} {unit} is out of range")]
    OutOfRange { duration: i64, unit: ReminderUnit },
}

/// The unit a reminder duration is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderUnit {
    Minute,
    Hour,
    Day,
}

impl ReminderUnit {
    /// Parses a unit label as submitted by the configuration form.
    ///
    /// Accepts `min` (the form's spelling) and `minute` as synonyms.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "min" | "minute" => Some(Self::Minute),
            "hour" => Some(Self::Hour),
            "day" => Some(Self::Day),
            _ => None,
        }
    }

    /// Minutes per unit: minute=1, hour=60, day=1440.
    pub fn minutes_factor(&self) -> u32 {
        match self {
            Self::Minute => 1,
            Self::Hour => 60,
            Self::Day => 1440,
        }
    }

    /// Returns a stable label for this unit.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minute => "min",
            Self::Hour => "hour",
            Self::Day => "day",
        }
    }
}

impl std::fmt::Display for ReminderUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A raw reminder specification, exactly as submitted.
///
/// The duration is kept signed and the unit unparsed so that validation can
/// report the offending value instead of failing at the deserialization edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSpec {
    /// How many units before the event the reminder fires.
    pub duration: i64,
    /// Unit label: `min`, `hour`, or `day`.
    pub unit: String,
}

impl ReminderSpec {
    /// Creates a new reminder specification.
    pub fn new(duration: i64, unit: impl Into<String>) -> Self {
        Self {
            duration,
            unit: unit.into(),
        }
    }
}

/// A normalized reminder lead time: minutes before the event start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReminderOffset {
    /// Minutes before the event start at which the reminder fires.
    pub minutes_before: u32,
}

impl ReminderOffset {
    /// Creates an offset from a minute count.
    pub fn minutes(minutes_before: u32) -> Self {
        Self { minutes_before }
    }
}

/// Normalizes a single reminder specification.
///
/// # Errors
///
/// Returns [`ReminderError`] if the duration is not positive, the unit label
/// is unrecognized, or the lead time overflows the supported range.
pub fn normalize_reminder(spec: &ReminderSpec) -> Result<ReminderOffset, ReminderError> {
    let unit =
        ReminderUnit::parse(&spec.unit).ok_or_else(|| ReminderError::UnknownUnit(spec.unit.clone()))?;

    if spec.duration <= 0 {
        return Err(ReminderError::NonPositiveDuration(spec.duration));
    }

    let duration = u32::try_from(spec.duration).map_err(|_| ReminderError::OutOfRange {
        duration: spec.duration,
        unit,
    })?;

    let minutes_before =
        duration
            .checked_mul(unit.minutes_factor())
            .ok_or(ReminderError::OutOfRange {
                duration: spec.duration,
                unit,
            })?;

    Ok(ReminderOffset::minutes(minutes_before))
}

/// Normalizes a list of reminder specifications, preserving order.
///
/// Order is significant for display; scheduling does not care. An empty list
/// is valid and yields an empty result.
///
/// # Errors
///
/// Fails on the first invalid specification, reporting it.
pub fn normalize_reminders(specs: &[ReminderSpec]) -> Result<Vec<ReminderOffset>, ReminderError> {
    specs.iter().map(normalize_reminder).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod unit_parsing {
        use super::*;

        #[test]
        fn recognizes_labels() {
            assert_eq!(ReminderUnit::parse("min"), Some(ReminderUnit::Minute));
            assert_eq!(ReminderUnit::parse("minute"), Some(ReminderUnit::Minute));
            assert_eq!(ReminderUnit::parse("hour"), Some(ReminderUnit::Hour));
            assert_eq!(ReminderUnit::parse("day"), Some(ReminderUnit::Day));
        }

        #[test]
        fn is_case_and_whitespace_tolerant() {
            assert_eq!(ReminderUnit::parse(" Hour "), Some(ReminderUnit::Hour));
            assert_eq!(ReminderUnit::parse("DAY"), Some(ReminderUnit::Day));
        }

        #[test]
        fn rejects_unknown_labels() {
            assert_eq!(ReminderUnit::parse("week"), None);
            assert_eq!(ReminderUnit::parse(""), None);
        }

        #[test]
        fn factors() {
            assert_eq!(ReminderUnit::Minute.minutes_factor(), 1);
            assert_eq!(ReminderUnit::Hour.minutes_factor(), 60);
            assert_eq!(ReminderUnit::Day.minutes_factor(), 1440);
        }
    }

    mod normalization {
        use super::*;

        #[test]
        fn thirty_minutes_and_one_hour() {
            let specs = vec![ReminderSpec::new(30, "min"), ReminderSpec::new(1, "hour")];
            let offsets = normalize_reminders(&specs).unwrap();
            assert_eq!(
                offsets,
                vec![ReminderOffset::minutes(30), ReminderOffset::minutes(60)]
            );
        }

        #[test]
        fn one_day_is_1440_minutes() {
            let offset = normalize_reminder(&ReminderSpec::new(1, "day")).unwrap();
            assert_eq!(offset.minutes_before, 1440);
        }

        #[test]
        fn preserves_submission_order() {
            let specs = vec![
                ReminderSpec::new(2, "day"),
                ReminderSpec::new(5, "min"),
                ReminderSpec::new(1, "hour"),
            ];
            let offsets = normalize_reminders(&specs).unwrap();
            let minutes: Vec<_> = offsets.iter().map(|o| o.minutes_before).collect();
            assert_eq!(minutes, vec![2880, 5, 60]);
        }

        #[test]
        fn monotone_in_duration_for_fixed_unit() {
            for unit in ["min", "hour", "day"] {
                let mut previous = 0;
                for duration in 1..=48 {
                    let offset = normalize_reminder(&ReminderSpec::new(duration, unit)).unwrap();
                    assert!(offset.minutes_before > previous);
                    previous = offset.minutes_before;
                }
            }
        }

        #[test]
        fn empty_list_is_valid() {
            assert_eq!(normalize_reminders(&[]).unwrap(), vec![]);
        }

        #[test]
        fn rejects_zero_and_negative_durations() {
            assert_eq!(
                normalize_reminder(&ReminderSpec::new(0, "min")),
                Err(ReminderError::NonPositiveDuration(0))
            );
            assert_eq!(
                normalize_reminder(&ReminderSpec::new(-5, "hour")),
                Err(ReminderError::NonPositiveDuration(-5))
            );
        }

        #[test]
        fn rejects_unknown_unit() {
            assert_eq!(
                normalize_reminder(&ReminderSpec::new(1, "fortnight")),
                Err(ReminderError::UnknownUnit("fortnight".into()))
            );
        }

        #[test]
        fn rejects_overflowing_lead_times() {
            let err = normalize_reminder(&ReminderSpec::new(i64::from(u32::MAX) + 1, "min"))
                .unwrap_err();
            assert!(matches!(err, ReminderError::OutOfRange { .. }));

            let err = normalize_reminder(&ReminderSpec::new(i64::from(u32::MAX), "day")).unwrap_err();
            assert!(matches!(err, ReminderError::OutOfRange { .. }));
        }

        #[test]
        fn fails_on_first_invalid_entry() {
            let specs = vec![ReminderSpec::new(10, "min"), ReminderSpec::new(0, "day")];
            assert!(normalize_reminders(&specs).is_err());
        }
    }
}
