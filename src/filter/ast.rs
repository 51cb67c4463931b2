//! Filter tree structures
//!
//! Trees are built once from caller input and never mutated. Children are
//! owned by their group, so a tree has no sharing and no cycles.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::FilterError;
use super::parser;

/// Boolean operator of a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoolOp {
    And,
    Or,
}

impl BoolOp {
    /// Returns the wire key of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            BoolOp::And => "and",
            BoolOp::Or => "or",
        }
    }
}

/// A single property comparison
///
/// Wire form: `{ "property": p, <kind>: { <operator>: operand } }`
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Property name; absent only when the caller omitted it
    pub property: Option<String>,
    /// Condition key of the wire form, e.g. `select` or `number`
    pub kind: String,
    /// Comparison operator, e.g. `equals`
    pub operator: String,
    /// Operand, opaque beyond its presence
    pub operand: Value,
}

impl Condition {
    pub fn new(
        property: impl Into<String>,
        kind: impl Into<String>,
        operator: impl Into<String>,
        operand: Value,
    ) -> Self {
        Self {
            property: Some(property.into()),
            kind: kind.into(),
            operator: operator.into(),
            operand,
        }
    }

    /// Renders the condition back into its wire form
    pub fn to_value(&self) -> Value {
        let mut body = Map::new();
        body.insert(self.operator.clone(), self.operand.clone());

        let mut object = Map::new();
        if let Some(property) = &self.property {
            object.insert("property".to_string(), Value::String(property.clone()));
        }
        object.insert(self.kind.clone(), Value::Object(body));
        Value::Object(object)
    }
}

/// A filter expression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum Filter {
    /// AND/OR over child filters
    Group { op: BoolOp, children: Vec<Filter> },
    /// Leaf comparison
    Condition(Condition),
}

impl Filter {
    /// Creates an AND group
    pub fn and(children: Vec<Filter>) -> Self {
        Filter::Group {
            op: BoolOp::And,
            children,
        }
    }

    /// Creates an OR group
    pub fn or(children: Vec<Filter>) -> Self {
        Filter::Group {
            op: BoolOp::Or,
            children,
        }
    }

    /// Creates a leaf condition
    pub fn condition(
        property: impl Into<String>,
        kind: impl Into<String>,
        operator: impl Into<String>,
        operand: Value,
    ) -> Self {
        Filter::Condition(Condition::new(property, kind, operator, operand))
    }

    /// Parses a non-null wire value
    pub fn from_value(value: &Value) -> Result<Self, FilterError> {
        parser::parse_node(value)
    }

    /// Renders the tree back into its wire form
    pub fn to_value(&self) -> Value {
        match self {
            Filter::Group { op, children } => {
                let mut object = Map::new();
                object.insert(
                    op.as_str().to_string(),
                    Value::Array(children.iter().map(Filter::to_value).collect()),
                );
                Value::Object(object)
            }
            Filter::Condition(condition) => condition.to_value(),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Filter::Group { .. })
    }
}

impl TryFrom<Value> for Filter {
    type Error = FilterError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Filter::from_value(&value)
    }
}

impl From<Filter> for Value {
    fn from(filter: Filter) -> Self {
        filter.to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_condition_wire_form() {
        let filter = Filter::condition("Status", "status", "equals", json!("Active"));
        assert_eq!(
            filter.to_value(),
            json!({"property": "Status", "status": {"equals": "Active"}})
        );
    }

    #[test]
    fn test_group_wire_form() {
        let filter = Filter::or(vec![
            Filter::condition("Priority", "select", "equals", json!("High")),
            Filter::and(vec![Filter::condition(
                "Estimated Value",
                "number",
                "greater_than",
                json!(1000),
            )]),
        ]);

        assert_eq!(
            filter.to_value(),
            json!({"or": [
                {"property": "Priority", "select": {"equals": "High"}},
                {"and": [{"property": "Estimated Value", "number": {"greater_than": 1000}}]}
            ]})
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let wire = json!({"and": [
            {"property": "Company", "rich_text": {"contains": "Acme"}},
            {"property": "Status", "status": {"is_not_empty": true}}
        ]});

        let filter: Filter = serde_json::from_value(wire.clone()).unwrap();
        assert!(filter.is_group());
        assert_eq!(serde_json::to_value(&filter).unwrap(), wire);
    }

    #[test]
    fn test_optional_filter_accepts_null() {
        let filter: Option<Filter> = serde_json::from_value(Value::Null).unwrap();
        assert!(filter.is_none());
    }

    #[test]
    fn test_deserialize_rejects_malformed() {
        let result: Result<Filter, _> = serde_json::from_value(json!({"and": []}));
        assert!(result.is_err());
    }
}
