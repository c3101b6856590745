use serde::{Deserialize, Serialize};

use crate::engine::schema::types::Dimension;
use crate::engine::types::ScalarValue;

/// A column reference inside a filter predicate. The dimension is filled in
/// during query binding; it stays `None` for measure references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub name: String,
    pub dimension: Option<Dimension>,
}

impl ColumnRef {
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dimension: None,
        }
    }

    pub fn is_dimension(&self) -> bool {
        self.dimension.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// Boolean filter expression tree attached to a query request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterExpr {
    Compare {
        column: ColumnRef,
        op: CompareOp,
        value: ScalarValue,
    },
    In {
        column: ColumnRef,
        values: Vec<ScalarValue>,
    },
    And(Box<FilterExpr>, Box<FilterExpr>),
    Or(Box<FilterExpr>, Box<FilterExpr>),
    Not(Box<FilterExpr>),
}

impl FilterExpr {
    /// Every column reference in this subtree, in traversal order.
    pub fn column_refs(&self) -> Vec<&ColumnRef> {
        let mut refs = Vec::new();
        self.collect_refs(&mut refs);
        refs
    }

    fn collect_refs<'a>(&'a self, refs: &mut Vec<&'a ColumnRef>) {
        match self {
            FilterExpr::Compare { column, .. } | FilterExpr::In { column, .. } => {
                refs.push(column);
            }
            FilterExpr::And(left, right) | FilterExpr::Or(left, right) => {
                left.collect_refs(refs);
                right.collect_refs(refs);
            }
            FilterExpr::Not(inner) => inner.collect_refs(refs),
        }
    }

    pub fn is_logical_combinator(&self) -> bool {
        matches!(self, FilterExpr::And(_, _) | FilterExpr::Or(_, _))
    }

    /// Applies `resolve` to every column reference in the tree.
    pub fn resolve_columns<F>(&mut self, resolve: &F)
    where
        F: Fn(&str) -> Option<Dimension>,
    {
        match self {
            FilterExpr::Compare { column, .. } | FilterExpr::In { column, .. } => {
                if column.dimension.is_none() {
                    column.dimension = resolve(&column.name);
                }
            }
            FilterExpr::And(left, right) | FilterExpr::Or(left, right) => {
                left.resolve_columns(resolve);
                right.resolve_columns(resolve);
            }
            FilterExpr::Not(inner) => inner.resolve_columns(resolve),
        }
    }
}
