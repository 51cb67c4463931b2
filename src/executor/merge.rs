//! Recombination of child result sets keyed by record id

use std::collections::HashSet;

use crate::filter::BoolOp;
use crate::remote::Record;

/// Merges per-child results with the semantics of the group's operator
pub fn merge(op: BoolOp, results: Vec<Vec<Record>>) -> Vec<Record> {
    match op {
        BoolOp::And => intersect(results),
        BoolOp::Or => union(results),
    }
}

/// Keeps the records of the first result set whose id appears in every other set.
///
/// Order and payload come from the first set.
pub fn intersect(results: Vec<Vec<Record>>) -> Vec<Record> {
    let mut sets = results.into_iter();
    let Some(base) = sets.next() else {
        return Vec::new();
    };

    let others: Vec<HashSet<String>> = sets
        .map(|records| records.into_iter().map(|r| r.id).collect())
        .collect();

    base.into_iter()
        .filter(|record| others.iter().all(|ids| ids.contains(&record.id)))
        .collect()
}

/// Concatenates result sets in order, keeping the first occurrence of each id
pub fn union(results: Vec<Vec<Record>>) -> Vec<Record> {
    let mut seen = HashSet::new();
    results
        .into_iter()
        .flatten()
        .filter(|record| seen.insert(record.id.clone()))
        .collect()
}
