//! Property schema registry
//!
//! Types are stored as raw names so a deployment can list a property whose
//! type this crate does not support; such a property resolves to `None` and is
//! rejected by the filter validator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::property::PropertyType;

/// Read-only mapping of filterable properties and sortable properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    /// Property name → semantic type name
    #[serde(default = "default_properties")]
    properties: BTreeMap<String, String>,

    /// Properties accepted by sort requests, in the order used by error messages
    #[serde(default = "default_sortable")]
    sortable: Vec<String>,
}

fn default_properties() -> BTreeMap<String, String> {
    [
        ("Company", PropertyType::RichText),
        ("Status", PropertyType::Status),
        ("Priority", PropertyType::Select),
        ("Estimated Value", PropertyType::Number),
    ]
    .into_iter()
    .map(|(name, ty)| (name.to_string(), ty.as_str().to_string()))
    .collect()
}

fn default_sortable() -> Vec<String> {
    [
        "Name",
        "Company",
        "Status",
        "Priority",
        "Estimated Value",
        "Account Owner",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for PropertySchema {
    fn default() -> Self {
        Self {
            properties: default_properties(),
            sortable: default_sortable(),
        }
    }
}

impl PropertySchema {
    /// Creates an empty schema (no filterable or sortable properties)
    pub fn empty() -> Self {
        Self {
            properties: BTreeMap::new(),
            sortable: Vec::new(),
        }
    }

    /// Adds or replaces a filterable property
    pub fn with_property(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.properties.insert(name.into(), type_name.into());
        self
    }

    /// Adds a sortable property
    pub fn with_sortable(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.sortable.contains(&name) {
            self.sortable.push(name);
        }
        self
    }

    /// Resolves the semantic type of a property.
    ///
    /// Returns `None` when the property is unknown or its configured type is
    /// not one of the supported types.
    pub fn property_type(&self, property: &str) -> Option<PropertyType> {
        self.properties
            .get(property)
            .and_then(|name| PropertyType::from_name(name))
    }

    /// Returns the configured type name, supported or not
    pub fn raw_type(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }

    pub fn is_sortable(&self, property: &str) -> bool {
        self.sortable.iter().any(|p| p == property)
    }

    pub fn sortable(&self) -> &[String] {
        &self.sortable
    }

    /// Iterates filterable properties in name order
    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(name, ty)| (name.as_str(), ty.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_deployment() {
        let schema = PropertySchema::default();

        assert_eq!(schema.property_type("Company"), Some(PropertyType::RichText));
        assert_eq!(schema.property_type("Status"), Some(PropertyType::Status));
        assert_eq!(schema.property_type("Priority"), Some(PropertyType::Select));
        assert_eq!(
            schema.property_type("Estimated Value"),
            Some(PropertyType::Number)
        );
        assert_eq!(schema.property_type("Name"), None);
        assert_eq!(schema.properties().count(), 4);
    }

    #[test]
    fn test_sortable_properties() {
        let schema = PropertySchema::default();

        assert!(schema.is_sortable("Name"));
        assert!(schema.is_sortable("Account Owner"));
        assert!(!schema.is_sortable("AccountOwner"));
        assert_eq!(schema.sortable().len(), 6);
    }

    #[test]
    fn test_unsupported_type_resolves_to_none() {
        let schema = PropertySchema::default().with_property("Owner", "people");

        assert_eq!(schema.raw_type("Owner"), Some("people"));
        assert_eq!(schema.property_type("Owner"), None);
    }

    #[test]
    fn test_builder() {
        let schema = PropertySchema::empty()
            .with_property("Closed", "checkbox")
            .with_sortable("Closed")
            .with_sortable("Closed");

        assert_eq!(schema.property_type("Closed"), Some(PropertyType::Checkbox));
        assert_eq!(schema.sortable(), ["Closed".to_string()]);
    }

    #[test]
    fn test_deserialize_partial_section_keeps_defaults() {
        let schema: PropertySchema = serde_json::from_str(
            r#"{"properties": {"Due": "date", "Company": "rich_text"}}"#,
        )
        .unwrap();

        assert_eq!(schema.property_type("Due"), Some(PropertyType::Date));
        assert_eq!(schema.property_type("Status"), None);
        assert!(schema.is_sortable("Priority"));
    }
}
