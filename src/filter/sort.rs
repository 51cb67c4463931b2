//! Sort request resolution
//!
//! The property is checked strictly; the direction is coerced. An unknown
//! property is an error while an unknown direction silently becomes ascending.

use serde::{Deserialize, Serialize};

use super::errors::{FilterError, FilterResult};
use crate::schema::PropertySchema;

/// Sort direction understood by the remote service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }

    /// Parses a caller-supplied direction, falling back to ascending
    pub fn coerce(direction: Option<&str>) -> Self {
        match direction {
            Some("descending") => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }
}

/// Raw sort request as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRequest {
    #[serde(default)]
    pub property: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
}

impl SortRequest {
    pub fn new(property: impl Into<String>, direction: impl Into<String>) -> Self {
        Self {
            property: Some(property.into()),
            direction: Some(direction.into()),
        }
    }

    pub fn ascending(property: impl Into<String>) -> Self {
        Self {
            property: Some(property.into()),
            direction: None,
        }
    }
}

/// Validated sort, in the remote service's `sorts` entry shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSort {
    pub property: String,
    pub direction: SortDirection,
}

/// Resolves a sort request against the sortable properties.
///
/// Returns `Ok(None)` when no sort was requested.
pub fn resolve_sort(
    schema: &PropertySchema,
    sort: Option<&SortRequest>,
) -> FilterResult<Option<ResolvedSort>> {
    let Some(sort) = sort else {
        return Ok(None);
    };

    let property = match sort.property.as_deref() {
        Some(p) if schema.is_sortable(p) => p,
        other => return Err(FilterError::invalid_sort_property(other, schema.sortable())),
    };

    Ok(Some(ResolvedSort {
        property: property.to_string(),
        direction: SortDirection::coerce(sort.direction.as_deref()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterErrorCode;

    #[test]
    fn test_no_sort() {
        let schema = PropertySchema::default();
        assert_eq!(resolve_sort(&schema, None).unwrap(), None);
    }

    #[test]
    fn test_valid_sort() {
        let schema = PropertySchema::default();
        let sort = SortRequest::new("Estimated Value", "descending");

        let resolved = resolve_sort(&schema, Some(&sort)).unwrap().unwrap();
        assert_eq!(resolved.property, "Estimated Value");
        assert_eq!(resolved.direction, SortDirection::Descending);
    }

    #[test]
    fn test_direction_defaults_to_ascending() {
        let schema = PropertySchema::default();

        let missing = resolve_sort(&schema, Some(&SortRequest::ascending("Name")))
            .unwrap()
            .unwrap();
        assert_eq!(missing.direction, SortDirection::Ascending);

        let invalid = resolve_sort(&schema, Some(&SortRequest::new("Name", "sideways")))
            .unwrap()
            .unwrap();
        assert_eq!(invalid.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_invalid_property_is_an_error() {
        let schema = PropertySchema::default();
        let err = resolve_sort(&schema, Some(&SortRequest::new("Bogus", "ascending")))
            .unwrap_err();

        assert_eq!(err.code(), FilterErrorCode::InvalidSortProperty);
        assert!(err.message().contains("Bogus"));
        assert!(err.message().contains("Account Owner"));
    }

    #[test]
    fn test_missing_property_is_an_error() {
        let schema = PropertySchema::default();
        let err = resolve_sort(&schema, Some(&SortRequest::default())).unwrap_err();
        assert_eq!(err.code(), FilterErrorCode::InvalidSortProperty);
    }

    #[test]
    fn test_remote_shape() {
        let sort = ResolvedSort {
            property: "Company".into(),
            direction: SortDirection::Descending,
        };
        assert_eq!(
            serde_json::to_value(&sort).unwrap(),
            serde_json::json!({"property": "Company", "direction": "descending"})
        );
    }
}
