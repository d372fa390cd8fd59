//! Raw row data from a source database.
//!
//! A [`RawRow`] carries the property values of one row, keyed by property id
//! and tagged with the property's semantic type. Values stay in this dynamic
//! form until field extraction renders them into calendar event fields.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use rowcal_core::{EventStart, SemanticType};

/// A property value from a source row, tagged with its semantic type.
///
/// The tag always matches the [`SemanticType`] the source declared for the
/// property. Properties with no value on a given row are [`Empty`].
///
/// [`Empty`]: RawValue::Empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RawValue {
    Title(String),
    Text(String),
    RichText(String),
    Date(EventStart),
    Number(f64),
    Select(String),
    Status(String),
    Email(String),
    PhoneNumber(String),
    Url(String),
    Checkbox(bool),
    /// The property exists on the schema but holds no value for this row.
    Empty,
}

impl RawValue {
    /// Returns the semantic type this value is tagged with, if any.
    pub fn semantic_type(&self) -> Option<SemanticType> {
        match self {
            Self::Title(_) => Some(SemanticType::Title),
            Self::Text(_) => Some(SemanticType::Text),
            Self::RichText(_) => Some(SemanticType::RichText),
            Self::Date(_) => Some(SemanticType::Date),
            Self::Number(_) => Some(SemanticType::Number),
            Self::Select(_) => Some(SemanticType::Select),
            Self::Status(_) => Some(SemanticType::Status),
            Self::Email(_) => Some(SemanticType::Email),
            Self::PhoneNumber(_) => Some(SemanticType::PhoneNumber),
            Self::Url(_) => Some(SemanticType::Url),
            Self::Checkbox(_) => Some(SemanticType::Checkbox),
            Self::Empty => None,
        }
    }

    /// Renders this value as display text, if it has a textual rendering.
    ///
    /// Whole numbers render without a fractional part. Dates render as
    /// RFC 3339 instants or plain dates. Empty strings render as `None` so
    /// that callers can fall back uniformly.
    pub fn as_text(&self) -> Option<String> {
        let text = match self {
            Self::Title(s)
            | Self::Text(s)
            | Self::RichText(s)
            | Self::Select(s)
            | Self::Status(s)
            | Self::Email(s)
            | Self::PhoneNumber(s)
            | Self::Url(s) => s.clone(),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Self::Date(start) => match start {
                EventStart::DateTime(dt) => dt.to_rfc3339(),
                EventStart::Day(date) => date.to_string(),
            },
            Self::Checkbox(_) | Self::Empty => return None,
        };

        if text.is_empty() { None } else { Some(text) }
    }

    /// Returns the event start if this is a date value.
    pub fn as_start(&self) -> Option<EventStart> {
        match self {
            Self::Date(start) => Some(*start),
            _ => None,
        }
    }
}

/// One row of a source database, with its property values keyed by
/// property id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    /// Source-assigned row identifier.
    pub id: String,
    /// Property values keyed by property id.
    pub properties: HashMap<String, RawValue>,
}

impl RawRow {
    /// Creates a row with no property values.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            properties: HashMap::new(),
        }
    }

    /// Builder method to attach a property value.
    pub fn with_property(mut self, property_id: impl Into<String>, value: RawValue) -> Self {
        self.properties.insert(property_id.into(), value);
        self
    }

    /// Returns the value of a property, if present on this row.
    pub fn get(&self, property_id: &str) -> Option<&RawValue> {
        self.properties.get(property_id)
    }
}
