//! Parses the JSON wire form into a typed filter tree
//!
//! Parsing happens once, at the boundary. A leaf must name exactly one
//! condition key holding exactly one operator, so later stages never guess
//! which key is the operator.
//!
//! A [`LeafCheck`] runs while each leaf is parsed, so structural and schema
//! errors are reported together in depth-first order.

use serde_json::{Map, Value};

use super::ast::{BoolOp, Condition, Filter};
use super::errors::{FilterError, FilterResult};

/// Checks applied to each leaf during parsing
pub(crate) trait LeafCheck {
    /// Runs before the condition body is inspected
    fn check_property(&self, property: Option<&str>) -> FilterResult<()>;

    /// Runs once the leaf is fully parsed
    fn check_condition(&self, condition: &Condition) -> FilterResult<()>;
}

/// Structure only
struct NoCheck;

impl LeafCheck for NoCheck {
    fn check_property(&self, _: Option<&str>) -> FilterResult<()> {
        Ok(())
    }

    fn check_condition(&self, _: &Condition) -> FilterResult<()> {
        Ok(())
    }
}

/// Parses caller input. `null` is an absent filter.
pub fn parse_filter(value: &Value) -> FilterResult<Option<Filter>> {
    parse_checked(value, &NoCheck)
}

/// Parses caller input, running `check` on every leaf in tree order
pub(crate) fn parse_checked<C: LeafCheck>(value: &Value, check: &C) -> FilterResult<Option<Filter>> {
    if value.is_null() {
        return Ok(None);
    }
    parse_node_with(value, check).map(Some)
}

pub(crate) fn parse_node(value: &Value) -> FilterResult<Filter> {
    parse_node_with(value, &NoCheck)
}

fn parse_node_with<C: LeafCheck>(value: &Value, check: &C) -> FilterResult<Filter> {
    let object = value.as_object().ok_or_else(|| {
        FilterError::malformed(format!("Filter must be an object, got {}", type_name(value)))
    })?;

    let group = match (object.get("and"), object.get("or")) {
        (Some(_), Some(_)) => {
            return Err(FilterError::malformed(
                "Filter group must contain exactly one of 'and' or 'or'",
            ))
        }
        (Some(children), None) => Some((BoolOp::And, children)),
        (None, Some(children)) => Some((BoolOp::Or, children)),
        (None, None) => None,
    };

    if let Some((op, children)) = group {
        return parse_group(op, children, check);
    }

    parse_condition(object, check)
}

fn parse_group<C: LeafCheck>(op: BoolOp, children: &Value, check: &C) -> FilterResult<Filter> {
    let items = children.as_array().ok_or_else(|| {
        FilterError::malformed(format!("'{}' must be an array of filters", op.as_str()))
    })?;

    if items.is_empty() {
        return Err(FilterError::malformed(format!(
            "'{}' must contain at least one filter",
            op.as_str()
        )));
    }

    let children = items
        .iter()
        .map(|item| parse_node_with(item, check))
        .collect::<FilterResult<Vec<_>>>()?;
    Ok(Filter::Group { op, children })
}

fn parse_condition<C: LeafCheck>(object: &Map<String, Value>, check: &C) -> FilterResult<Filter> {
    let property = match object.get("property") {
        None | Some(Value::Null) => None,
        Some(Value::String(p)) if p.is_empty() => None,
        Some(Value::String(p)) => Some(p.clone()),
        Some(other) => {
            return Err(FilterError::malformed(format!(
                "'property' must be a string, got {}",
                type_name(other)
            )))
        }
    };
    check.check_property(property.as_deref())?;

    let mut condition_keys = object.iter().filter(|(key, _)| key.as_str() != "property");
    let (kind, body) = match (condition_keys.next(), condition_keys.next()) {
        (Some(entry), None) => entry,
        (None, _) => {
            return Err(FilterError::malformed(
                "Filter condition must contain a condition such as {\"select\": {\"equals\": ...}}",
            ))
        }
        (Some(_), Some(_)) => {
            return Err(FilterError::malformed(
                "Filter condition must contain exactly one condition key",
            ))
        }
    };

    let body = body.as_object().ok_or_else(|| {
        FilterError::malformed(format!("Condition '{}' must be an object", kind))
    })?;

    let mut operators = body.iter();
    let (operator, operand) = match (operators.next(), operators.next()) {
        (Some(entry), None) => entry,
        _ => {
            return Err(FilterError::malformed(format!(
                "Condition '{}' must contain exactly one operator",
                kind
            )))
        }
    };

    let condition = Condition {
        property,
        kind: kind.clone(),
        operator: operator.clone(),
        operand: operand.clone(),
    };
    check.check_condition(&condition)?;

    Ok(Filter::Condition(condition))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
