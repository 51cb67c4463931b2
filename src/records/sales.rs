//! Sales pipeline rows

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::remote::Record;

/// Placeholder written into every text field of a row that cannot be mapped
pub const NOT_FOUND: &str = "NOT_FOUND";

/// One row of the sales pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    pub id: String,
    pub name: String,
    pub company: String,
    pub status: String,
    pub priority: String,
    pub estimated_value: f64,
    pub account_owner: String,
}

impl SalesRecord {
    /// Row returned when a remote record lacks a cell or carries the wrong type
    pub fn not_found() -> Self {
        Self {
            id: String::new(),
            name: NOT_FOUND.to_string(),
            company: NOT_FOUND.to_string(),
            status: NOT_FOUND.to_string(),
            priority: NOT_FOUND.to_string(),
            estimated_value: 0.0,
            account_owner: NOT_FOUND.to_string(),
        }
    }

    /// Maps a remote record, falling back to the placeholder row
    pub fn from_record(record: &Record) -> Self {
        Self::try_map(record).unwrap_or_else(Self::not_found)
    }

    fn try_map(record: &Record) -> Option<Self> {
        let properties = record.payload.get("properties")?.as_object()?;

        let name = cell(properties, "Name", &["title"])?;
        let company = cell(properties, "Company", &["rich_text"])?;
        let status = cell(properties, "Status", &["select", "status"])?;
        let priority = cell(properties, "Priority", &["select"])?;
        let estimated_value = cell(properties, "Estimated Value", &["number"])?;
        let account_owner = cell(properties, "Account Owner", &["people"])?;

        Some(Self {
            id: record.id.clone(),
            name: first_plain_text(name),
            company: first_plain_text(company),
            status: option_name(status),
            priority: option_name(priority),
            estimated_value: estimated_value.as_f64().unwrap_or(0.0),
            account_owner: account_owner
                .get(0)
                .and_then(|person| person.get("object"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
    }
}

/// Maps remote records in order
pub fn map_records(records: &[Record]) -> Vec<SalesRecord> {
    records.iter().map(SalesRecord::from_record).collect()
}

static EMPTY: Value = Value::Null;

/// Looks up a cell and checks its `type` tag.
///
/// Returns the value stored under the type key, `null` when absent.
fn cell<'a>(properties: &'a Map<String, Value>, name: &str, types: &[&str]) -> Option<&'a Value> {
    let cell = properties.get(name)?;
    let ty = cell.get("type")?.as_str()?;
    if !types.iter().any(|t| *t == ty) {
        return None;
    }
    Some(cell.get(ty).unwrap_or(&EMPTY))
}

fn first_plain_text(value: &Value) -> String {
    value
        .get(0)
        .and_then(|fragment| fragment.get("plain_text"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn option_name(value: &Value) -> String {
    value
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
