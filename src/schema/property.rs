//! Semantic property types and their operator table

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic type of a database property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Checkbox,
    Date,
    MultiSelect,
    Number,
    RichText,
    Select,
    Timestamp,
    Status,
}

const CHECKBOX_OPERATORS: &[&str] = &["equals", "does_not_equal"];
const DATE_OPERATORS: &[&str] = &[
    "after",
    "before",
    "on_or_after",
    "on_or_before",
    "is_empty",
    "is_not_empty",
];
const MULTI_SELECT_OPERATORS: &[&str] = &["contains", "does_not_contain", "is_empty", "is_not_empty"];
const NUMBER_OPERATORS: &[&str] = &[
    "equals",
    "does_not_equal",
    "greater_than",
    "less_than",
    "is_empty",
    "is_not_empty",
];
const RICH_TEXT_OPERATORS: &[&str] = &[
    "equals",
    "does_not_equal",
    "contains",
    "does_not_contain",
    "is_empty",
    "is_not_empty",
];
const SELECT_OPERATORS: &[&str] = &["equals", "does_not_equal", "is_empty", "is_not_empty"];
const TIMESTAMP_OPERATORS: &[&str] = &["after", "before", "on_or_after", "on_or_before"];

impl PropertyType {
    /// Every supported type, in the order used by error messages
    pub const ALL: [PropertyType; 8] = [
        PropertyType::Checkbox,
        PropertyType::Date,
        PropertyType::MultiSelect,
        PropertyType::Number,
        PropertyType::RichText,
        PropertyType::Select,
        PropertyType::Timestamp,
        PropertyType::Status,
    ];

    /// Returns the wire name of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Checkbox => "checkbox",
            PropertyType::Date => "date",
            PropertyType::MultiSelect => "multi_select",
            PropertyType::Number => "number",
            PropertyType::RichText => "rich_text",
            PropertyType::Select => "select",
            PropertyType::Timestamp => "timestamp",
            PropertyType::Status => "status",
        }
    }

    /// Resolves a wire name, `None` for anything outside the enumeration
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// Operators permitted on a property of this type
    pub fn operators(&self) -> &'static [&'static str] {
        match self {
            PropertyType::Checkbox => CHECKBOX_OPERATORS,
            PropertyType::Date => DATE_OPERATORS,
            PropertyType::MultiSelect => MULTI_SELECT_OPERATORS,
            PropertyType::Number => NUMBER_OPERATORS,
            PropertyType::RichText => RICH_TEXT_OPERATORS,
            PropertyType::Select | PropertyType::Status => SELECT_OPERATORS,
            PropertyType::Timestamp => TIMESTAMP_OPERATORS,
        }
    }

    pub fn supports(&self, operator: &str) -> bool {
        self.operators().contains(&operator)
    }

    /// Comma-separated list of all supported type names
    pub fn supported_names() -> String {
        Self::ALL
            .iter()
            .map(PropertyType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
