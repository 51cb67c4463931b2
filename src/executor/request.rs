//! Wire form of a resolution request
//!
//! Shared by the `POST /api/sort-filter` body and the CLI's stdin request.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::filter::{Filter, FilterResult, FilterValidator, SortRequest};
use crate::schema::PropertySchema;

/// `{ "filter"?, "sort"?, "maxNestingLevel"? }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    /// Raw filter tree; `null` or absent means no filter
    #[serde(default)]
    pub filter: Value,
    /// Sort object; any other JSON value means no sort
    #[serde(default, deserialize_with = "lenient_sort")]
    pub sort: Option<SortRequest>,
    #[serde(default)]
    pub max_nesting_level: Option<usize>,
}

impl ResolveRequest {
    /// Parses the raw filter into a tree, validating it against `schema` on the way
    pub fn parse_filter(&self, schema: &PropertySchema) -> FilterResult<Option<Filter>> {
        FilterValidator::new(schema).parse(&self.filter)
    }

    /// Nesting limit for this request, falling back to `default`
    pub fn max_nesting_level_or(&self, default: usize) -> usize {
        self.max_nesting_level.unwrap_or(default)
    }
}

fn lenient_sort<'de, D>(deserializer: D) -> Result<Option<SortRequest>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).map(Some).map_err(D::Error::custom),
        _ => Ok(None),
    }
}
