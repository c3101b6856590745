use std::collections::HashSet;

use crate::engine::core::filter::expr::FilterExpr;
use crate::engine::schema::types::Dimension;

/// Collects every complex (nested) dimension referenced by the filter tree.
///
/// Only a top-level And/Or combinator is descended into; a leaf comparison or
/// Not root yields the empty set. Downstream dictionary and complex-schema
/// resolution depend on this exact set, so the scoping must not be widened
/// independently of them.
pub fn complex_filter_dimensions(filter: Option<&FilterExpr>) -> Vec<Dimension> {
    let mut dimensions = Vec::new();
    let Some(root) = filter else {
        return dimensions;
    };
    if !root.is_logical_combinator() {
        return dimensions;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for column in root.column_refs() {
        let Some(dimension) = column.dimension.as_ref() else {
            continue;
        };
        if dimension.child_count() == 0 {
            continue;
        }
        if seen.insert(dimension.column_id.as_str()) {
            dimensions.push(dimension.clone());
        }
    }
    dimensions
}
