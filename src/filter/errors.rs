//! Filter error types
//!
//! Error codes:
//! - FLATQUERY_FILTER_MALFORMED
//! - FLATQUERY_FILTER_MISSING_PROPERTY
//! - FLATQUERY_FILTER_UNSUPPORTED_PROPERTY_TYPE
//! - FLATQUERY_FILTER_UNSUPPORTED_OPERATOR
//! - FLATQUERY_SORT_INVALID_PROPERTY
//!
//! All of them are detected locally, before any remote call, and are never retried.

use std::fmt;

use crate::schema::PropertyType;

/// Filter-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterErrorCode {
    /// Wire form does not describe a filter tree
    MalformedFilter,
    /// Leaf condition has no property name
    MissingProperty,
    /// Property unknown to the schema, or its type is unsupported
    UnsupportedPropertyType,
    /// Operator not permitted for the property's type
    UnsupportedOperator,
    /// Sort property is not sortable
    InvalidSortProperty,
}

impl FilterErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            FilterErrorCode::MalformedFilter => "FLATQUERY_FILTER_MALFORMED",
            FilterErrorCode::MissingProperty => "FLATQUERY_FILTER_MISSING_PROPERTY",
            FilterErrorCode::UnsupportedPropertyType => {
                "FLATQUERY_FILTER_UNSUPPORTED_PROPERTY_TYPE"
            }
            FilterErrorCode::UnsupportedOperator => "FLATQUERY_FILTER_UNSUPPORTED_OPERATOR",
            FilterErrorCode::InvalidSortProperty => "FLATQUERY_SORT_INVALID_PROPERTY",
        }
    }
}

impl fmt::Display for FilterErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Filter error with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterError {
    code: FilterErrorCode,
    message: String,
    property: Option<String>,
}

impl FilterError {
    /// Create a malformed filter error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self {
            code: FilterErrorCode::MalformedFilter,
            message: reason.into(),
            property: None,
        }
    }

    /// Create a missing property error
    pub fn missing_property() -> Self {
        Self {
            code: FilterErrorCode::MissingProperty,
            message: "Property is required in filter condition".into(),
            property: None,
        }
    }

    /// Create an unsupported property type error
    pub fn unsupported_property_type(property: impl Into<String>) -> Self {
        let p = property.into();
        Self {
            code: FilterErrorCode::UnsupportedPropertyType,
            message: format!(
                "Unsupported property type for {}. Supported types: {}",
                p,
                PropertyType::supported_names()
            ),
            property: Some(p),
        }
    }

    /// Create an unsupported operator error
    pub fn unsupported_operator(
        operator: &str,
        property_type: PropertyType,
        property: impl Into<String>,
    ) -> Self {
        let p = property.into();
        Self {
            code: FilterErrorCode::UnsupportedOperator,
            message: format!(
                "Unsupported operator '{}' for type '{}' in property '{}'. Supported operators: {}",
                operator,
                property_type,
                p,
                property_type.operators().join(", ")
            ),
            property: Some(p),
        }
    }

    /// Create an invalid sort property error
    pub fn invalid_sort_property(property: Option<&str>, valid: &[String]) -> Self {
        Self {
            code: FilterErrorCode::InvalidSortProperty,
            message: format!(
                "Invalid sort property: {}. Must be one of: {}",
                property.unwrap_or("undefined"),
                valid.join(", ")
            ),
            property: property.map(String::from),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> FilterErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending property if applicable
    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for FilterError {}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
