//! Source property classification and field-role eligibility.
//!
//! This module provides the types for describing properties of an external
//! source database and deciding which of them may be mapped onto a calendar
//! field:
//! - [`SemanticType`]: the closed set of property type tags the source declares
//! - [`SourceProperty`]: a property as the source describes it (read-only)
//! - [`FieldRole`]: the calendar slot a property can be mapped onto
//! - [`candidates_for_role`]: the eligible subset for a given role

use serde::{Deserialize, Serialize};

/// The declared semantic type of a source-database property.
///
/// The source owns this classification; the core never inspects values to
/// infer a type. Tags the core does not recognize deserialize to [`Other`]
/// and are never eligible for any field role.
///
/// [`Other`]: SemanticType::Other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    Date,
    Email,
    Number,
    PhoneNumber,
    Select,
    Status,
    Text,
    RichText,
    Title,
    Url,
    Checkbox,
    MultiSelect,
    People,
    Files,
    Formula,
    CreatedTime,
    LastEditedTime,
    /// Any tag the core does not recognize.
    #[serde(other)]
    Other,
}

impl SemanticType {
    /// Returns the wire tag for this semantic type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Email => "email",
            Self::Number => "number",
            Self::PhoneNumber => "phone_number",
            Self::Select => "select",
            Self::Status => "status",
            Self::Text => "text",
            Self::RichText => "rich_text",
            Self::Title => "title",
            Self::Url => "url",
            Self::Checkbox => "checkbox",
            Self::MultiSelect => "multi_select",
            Self::People => "people",
            Self::Files => "files",
            Self::Formula => "formula",
            Self::CreatedTime => "created_time",
            Self::LastEditedTime => "last_edited_time",
            Self::Other => "other",
        }
    }

    /// All recognized semantic types, for exhaustive eligibility checks.
    pub const ALL: [SemanticType; 18] = [
        Self::Date,
        Self::Email,
        Self::Number,
        Self::PhoneNumber,
        Self::Select,
        Self::Status,
        Self::Text,
        Self::RichText,
        Self::Title,
        Self::Url,
        Self::Checkbox,
        Self::MultiSelect,
        Self::People,
        Self::Files,
        Self::Formula,
        Self::CreatedTime,
        Self::LastEditedTime,
        Self::Other,
    ];
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A property of a source database, as declared by the source.
///
/// Immutable from the core's point of view: the external source owns the
/// schema and the core only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceProperty {
    /// Source-assigned property identifier.
    pub id: String,
    /// Human-readable property name.
    pub name: String,
    /// The source's declared type for this property.
    pub semantic_type: SemanticType,
}

impl SourceProperty {
    /// Creates a new source property.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        semantic_type: SemanticType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            semantic_type,
        }
    }
}

/// The calendar field a source property can be mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    /// The event title.
    Title,
    /// The event start date. Only date-typed properties qualify.
    Date,
    /// The event description.
    Description,
}

impl FieldRole {
    /// Returns the semantic types this role accepts.
    ///
    /// Title and Description accept a broad set of renderable types; Date
    /// accepts date-typed properties only.
    pub fn accepted_types(&self) -> &'static [SemanticType] {
        match self {
            Self::Title => &[
                SemanticType::Date,
                SemanticType::Email,
                SemanticType::Number,
                SemanticType::PhoneNumber,
                SemanticType::Select,
                SemanticType::Status,
                SemanticType::Title,
            ],
            Self::Date => &[SemanticType::Date],
            Self::Description => &[
                SemanticType::Date,
                SemanticType::Email,
                SemanticType::Number,
                SemanticType::PhoneNumber,
                SemanticType::Select,
                SemanticType::RichText,
                SemanticType::Status,
                SemanticType::Title,
                SemanticType::Url,
            ],
        }
    }

    /// Returns true if a property of the given type may fill this role.
    pub fn accepts(&self, semantic_type: SemanticType) -> bool {
        self.accepted_types().contains(&semantic_type)
    }

    /// Returns a stable name for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Date => "date",
            Self::Description => "description",
        }
    }
}

impl std::fmt::Display for FieldRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A property offered to a human operator as a mapping choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCandidate {
    /// Source property identifier.
    pub id: String,
    /// Display title (the property name).
    pub title: String,
    /// Submission value (the property name, matching what the form sends back).
    pub value: String,
}

/// Returns the properties eligible for the given role, in source order.
///
/// Pure and total: an empty result simply means the role has no candidates
/// in this database.
pub fn candidates_for_role(properties: &[SourceProperty], role: FieldRole) -> Vec<FieldCandidate> {
    properties
        .iter()
        .filter(|p| role.accepts(p.semantic_type))
        .map(|p| FieldCandidate {
            id: p.id.clone(),
            title: p.name.clone(),
            value: p.name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_properties() -> Vec<SourceProperty> {
        vec![
            SourceProperty::new("p1", "Name", SemanticType::Title),
            SourceProperty::new("p2", "When", SemanticType::Date),
            SourceProperty::new("p3", "Notes", SemanticType::RichText),
            SourceProperty::new("p4", "Link", SemanticType::Url),
            SourceProperty::new("p5", "Done", SemanticType::Checkbox),
            SourceProperty::new("p6", "Owner", SemanticType::People),
        ]
    }

    mod acceptance_table {
        use super::*;

        #[test]
        fn date_role_accepts_only_dates() {
            for st in SemanticType::ALL {
                assert_eq!(FieldRole::Date.accepts(st), st == SemanticType::Date);
            }
        }

        #[test]
        fn title_role_rejects_rich_text_and_url() {
            assert!(!FieldRole::Title.accepts(SemanticType::RichText));
            assert!(!FieldRole::Title.accepts(SemanticType::Url));
            assert!(FieldRole::Title.accepts(SemanticType::Title));
            assert!(FieldRole::Title.accepts(SemanticType::Status));
        }

        #[test]
        fn description_role_is_the_broadest() {
            assert!(FieldRole::Description.accepts(SemanticType::RichText));
            assert!(FieldRole::Description.accepts(SemanticType::Url));
            assert!(!FieldRole::Description.accepts(SemanticType::Checkbox));
            assert!(!FieldRole::Description.accepts(SemanticType::People));
        }

        #[test]
        fn unrecognized_tags_are_never_eligible() {
            for role in [FieldRole::Title, FieldRole::Date, FieldRole::Description] {
                assert!(!role.accepts(SemanticType::Other));
            }
        }
    }

    mod candidates {
        use super::*;

        #[test]
        fn returns_only_accepted_properties() {
            let props = sample_properties();
            for role in [FieldRole::Title, FieldRole::Date, FieldRole::Description] {
                for candidate in candidates_for_role(&props, role) {
                    let property = props.iter().find(|p| p.id == candidate.id).unwrap();
                    assert!(role.accepts(property.semantic_type));
                }
            }
        }

        #[test]
        fn date_candidates() {
            let candidates = candidates_for_role(&sample_properties(), FieldRole::Date);
            assert_eq!(candidates.len(), 1);
            assert_eq!(candidates[0].id, "p2");
            assert_eq!(candidates[0].title, "When");
            assert_eq!(candidates[0].value, "When");
        }

        #[test]
        fn preserves_source_order() {
            let candidates = candidates_for_role(&sample_properties(), FieldRole::Description);
            let ids: Vec<_> = candidates.iter().map(|c| c.id.as_str()).collect();
            assert_eq!(ids, vec!["p1", "p2", "p3", "p4"]);
        }

        #[test]
        fn empty_result_is_valid() {
            let props = vec![SourceProperty::new("p1", "Done", SemanticType::Checkbox)];
            assert!(candidates_for_role(&props, FieldRole::Date).is_empty());
        }
    }

    mod serde_tags {
        use super::*;

        #[test]
        fn semantic_type_round_trips_snake_case() {
            let json = serde_json::to_string(&SemanticType::PhoneNumber).unwrap();
            assert_eq!(json, "\"phone_number\"");
            let parsed: SemanticType = serde_json::from_str("\"rich_text\"").unwrap();
            assert_eq!(parsed, SemanticType::RichText);
        }

        #[test]
        fn unknown_tag_falls_back_to_other() {
            let parsed: SemanticType = serde_json::from_str("\"rollup\"").unwrap();
            assert_eq!(parsed, SemanticType::Other);
        }
    }
}
