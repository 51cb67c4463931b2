//! Boolean nesting depth of a filter tree

use super::ast::Filter;

/// Returns the maximum depth of AND/OR nesting.
///
/// An absent filter and a leaf condition are depth 0. A group is one deeper
/// than its deepest child; an empty group counts as 0 so this never fails.
pub fn nesting_level(filter: Option<&Filter>) -> usize {
    match filter {
        None | Some(Filter::Condition(_)) => 0,
        Some(Filter::Group { children, .. }) => children
            .iter()
            .map(|child| nesting_level(Some(child)))
            .max()
            .map_or(0, |deepest| deepest + 1),
    }
}
