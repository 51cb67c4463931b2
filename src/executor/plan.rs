//! Decomposition plan
//!
//! A plan is the shape of a resolution before any remote call: either one
//! direct request, or a merge over independently resolved children. The
//! resolver executes plans; the CLI prints them.

use serde::Serialize;

use crate::filter::{nesting_level, BoolOp, Filter, ResolvedSort};

/// How a filter will be resolved against a service with a nesting limit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum DecompositionPlan {
    /// One request carrying the filter and sort as-is
    Direct {
        #[serde(skip_serializing_if = "Option::is_none")]
        filter: Option<Filter>,
        #[serde(skip_serializing_if = "Option::is_none")]
        sort: Option<ResolvedSort>,
        nesting_level: usize,
    },
    /// Children resolved independently, then merged by record id
    Merge {
        op: BoolOp,
        nesting_level: usize,
        children: Vec<DecompositionPlan>,
    },
}

impl DecompositionPlan {
    /// Builds the plan for an already validated filter.
    ///
    /// A filter within the limit becomes one direct step carrying the sort.
    /// A group beyond the limit is split into its children, which are planned
    /// with the same limit and without the sort.
    pub fn build(
        filter: Option<&Filter>,
        sort: Option<ResolvedSort>,
        max_nesting_level: usize,
    ) -> Self {
        let level = nesting_level(filter);

        match filter {
            Some(Filter::Group { op, children }) if level > max_nesting_level => {
                DecompositionPlan::Merge {
                    op: *op,
                    nesting_level: level,
                    children: children
                        .iter()
                        .map(|child| Self::build(Some(child), None, max_nesting_level))
                        .collect(),
                }
            }
            _ => DecompositionPlan::Direct {
                filter: filter.cloned(),
                sort,
                nesting_level: level,
            },
        }
    }

    /// Number of remote requests executing this plan issues
    pub fn remote_calls(&self) -> usize {
        match self {
            DecompositionPlan::Direct { .. } => 1,
            DecompositionPlan::Merge { children, .. } => {
                children.iter().map(DecompositionPlan::remote_calls).sum()
            }
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, DecompositionPlan::Direct { .. })
    }
}
