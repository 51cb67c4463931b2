//! Filter validation against the property schema
//!
//! Walks the tree depth-first, children in order, and stops at the first
//! violation so the reported error is deterministic for a given input.
//! [`FilterValidator::parse`] applies the same checks while parsing the wire
//! form, so a malformed leaf never hides an earlier violation.

use serde_json::Value;

use super::ast::{Condition, Filter};
use super::errors::{FilterError, FilterResult};
use super::parser::{parse_checked, LeafCheck};
use crate::schema::{PropertySchema, PropertyType};

/// Validates filter trees against a property schema
pub struct FilterValidator<'a> {
    schema: &'a PropertySchema,
}

impl<'a> FilterValidator<'a> {
    pub fn new(schema: &'a PropertySchema) -> Self {
        Self { schema }
    }

    /// Parses and validates a wire filter in one depth-first pass.
    ///
    /// Each leaf is checked for its property, then the property's type, then
    /// its shape, then its operator. `null` is an absent filter.
    pub fn parse(&self, value: &Value) -> FilterResult<Option<Filter>> {
        parse_checked(value, self)
    }

    /// Validates a filter tree. An absent filter is valid.
    pub fn validate(&self, filter: Option<&Filter>) -> FilterResult<()> {
        match filter {
            None => Ok(()),
            Some(Filter::Group { children, .. }) => children
                .iter()
                .try_for_each(|child| self.validate(Some(child))),
            Some(Filter::Condition(condition)) => self.validate_condition(condition),
        }
    }

    fn property_type(&self, property: Option<&str>) -> FilterResult<PropertyType> {
        let property = property.ok_or_else(FilterError::missing_property)?;

        self.schema
            .property_type(property)
            .ok_or_else(|| FilterError::unsupported_property_type(property))
    }

    fn validate_condition(&self, condition: &Condition) -> FilterResult<()> {
        let property_type = self.property_type(condition.property.as_deref())?;
        let property = condition.property.as_deref().unwrap_or_default();

        if !property_type.supports(&condition.operator) {
            return Err(FilterError::unsupported_operator(
                &condition.operator,
                property_type,
                property,
            ));
        }

        Ok(())
    }
}

impl LeafCheck for FilterValidator<'_> {
    fn check_property(&self, property: Option<&str>) -> FilterResult<()> {
        self.property_type(property).map(|_| ())
    }

    fn check_condition(&self, condition: &Condition) -> FilterResult<()> {
        self.validate_condition(condition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{parse_filter, FilterErrorCode};
    use serde_json::{json, Value};

    fn validate(value: Value) -> FilterResult<()> {
        let schema = PropertySchema::default();
        let filter = parse_filter(&value).unwrap();
        FilterValidator::new(&schema).validate(filter.as_ref())
    }

    #[test]
    fn test_valid_condition() {
        assert!(validate(json!({"property": "Status", "select": {"equals": "Active"}})).is_ok());
    }

    #[test]
    fn test_absent_filter_is_valid() {
        assert!(validate(Value::Null).is_ok());
    }

    #[test]
    fn test_missing_property() {
        let err = validate(json!({"select": {"equals": "Active"}})).unwrap_err();
        assert_eq!(err.code(), FilterErrorCode::MissingProperty);
        assert_eq!(err.message(), "Property is required in filter condition");
    }

    #[test]
    fn test_unknown_property() {
        let err = validate(json!({"property": "Bogus", "select": {"equals": "x"}})).unwrap_err();
        assert_eq!(err.code(), FilterErrorCode::UnsupportedPropertyType);
        assert!(err.message().contains("Bogus"));
        assert!(err.message().contains("multi_select"));
    }

    #[test]
    fn test_property_with_unsupported_type() {
        let schema = PropertySchema::default().with_property("Account Owner", "people");
        let filter = parse_filter(&json!({"property": "Account Owner", "people": {"contains": "u1"}}))
            .unwrap();

        let err = FilterValidator::new(&schema)
            .validate(filter.as_ref())
            .unwrap_err();
        assert_eq!(err.code(), FilterErrorCode::UnsupportedPropertyType);
        assert_eq!(err.property(), Some("Account Owner"));
    }

    #[test]
    fn test_unsupported_operator() {
        let err = validate(json!({"property": "Status", "select": {"bogus_op": "x"}})).unwrap_err();
        assert_eq!(err.code(), FilterErrorCode::UnsupportedOperator);
        assert!(err.message().contains("bogus_op"));
        assert!(err.message().contains("status"));
    }

    #[test]
    fn test_operator_checked_against_property_type_not_condition_key() {
        // Estimated Value is a number: greater_than is fine whatever the key says
        assert!(validate(json!({
            "property": "Estimated Value",
            "number": {"greater_than": 500}
        }))
        .is_ok());

        let err = validate(json!({"property": "Estimated Value", "number": {"contains": "5"}}))
            .unwrap_err();
        assert_eq!(err.code(), FilterErrorCode::UnsupportedOperator);
    }

    #[test]
    fn test_nested_filters() {
        assert!(validate(json!({"and": [
            {"property": "Status", "select": {"equals": "Active"}},
            {"or": [
                {"property": "Priority", "select": {"equals": "High"}},
                {"property": "Company", "rich_text": {"contains": "Acme"}}
            ]}
        ]}))
        .is_ok());
    }

    fn parse(value: Value) -> FilterResult<Option<Filter>> {
        let schema = PropertySchema::default();
        FilterValidator::new(&schema).parse(&value)
    }

    #[test]
    fn test_parse_reports_schema_errors_before_shape() {
        let err = parse(json!({"select": {}})).unwrap_err();
        assert_eq!(err.code(), FilterErrorCode::MissingProperty);

        let err = parse(json!({"property": "Bogus", "select": "x"})).unwrap_err();
        assert_eq!(err.code(), FilterErrorCode::UnsupportedPropertyType);

        let err = parse(json!({"property": "Status", "select": "x"})).unwrap_err();
        assert_eq!(err.code(), FilterErrorCode::MalformedFilter);
    }

    #[test]
    fn test_parse_reports_errors_in_sibling_order() {
        let err = parse(json!({"or": [
            {"property": "Bogus", "select": {"equals": "x"}},
            {"property": "Status", "select": {}}
        ]}))
        .unwrap_err();
        assert_eq!(err.code(), FilterErrorCode::UnsupportedPropertyType);

        let err = parse(json!({"and": [
            {"property": "Status", "select": {}},
            {"property": "Bogus", "select": {"equals": "x"}}
        ]}))
        .unwrap_err();
        assert_eq!(err.code(), FilterErrorCode::MalformedFilter);
    }

    #[test]
    fn test_parse_matches_validate_on_valid_input() {
        let value = json!({"and": [
            {"property": "Status", "status": {"equals": "Active"}},
            {"property": "Estimated Value", "number": {"greater_than": 500}}
        ]});

        assert_eq!(parse(value.clone()).unwrap(), parse_filter(&value).unwrap());
        assert_eq!(parse(Value::Null).unwrap(), None);
    }

    #[test]
    fn test_first_failure_wins() {
        let filter = json!({"or": [
            {"property": "Status", "select": {"equals": "Active"}},
            {"and": [
                {"property": "Priority", "select": {"greater_than": 1}},
                {"property": "Bogus", "select": {"equals": "x"}}
            ]},
            {"select": {"equals": "x"}}
        ]});

        let first = validate(filter.clone()).unwrap_err();
        assert_eq!(first.code(), FilterErrorCode::UnsupportedOperator);
        assert_eq!(first.property(), Some("Priority"));

        // same input, same error
        assert_eq!(validate(filter).unwrap_err(), first);
    }
}
