use serde::{Deserialize, Serialize};

use crate::engine::core::filter::expr::FilterExpr;
use crate::engine::schema::catalog::TableId;
use crate::engine::schema::types::{Dimension, Measure};

/// A logical query request as it crosses the driver boundary: plain column
/// names only, to keep the serialized payload small.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub table: TableId,
    pub dimension_names: Vec<String>,
    pub measure_names: Vec<String>,
    pub sort_dimension_names: Vec<String>,
    pub filter: Option<FilterExpr>,
}

impl QueryRequest {
    pub fn new(table: TableId) -> Self {
        Self {
            table,
            dimension_names: Vec::new(),
            measure_names: Vec::new(),
            sort_dimension_names: Vec::new(),
            filter: None,
        }
    }
}

/// A requested dimension bound to its resolved schema object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDimension {
    pub column_name: String,
    pub dimension: Dimension,
}

impl QueryDimension {
    pub fn new(dimension: Dimension) -> Self {
        Self {
            column_name: dimension.name.clone(),
            dimension,
        }
    }
}

/// A requested measure bound to its resolved schema object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryMeasure {
    pub column_name: String,
    pub measure: Measure,
}

impl QueryMeasure {
    pub fn new(measure: Measure) -> Self {
        Self {
            column_name: measure.name.clone(),
            measure,
        }
    }
}

/// The fully bound query model consumed by the addressing layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryModel {
    pub table: TableId,
    pub dimensions: Vec<QueryDimension>,
    pub measures: Vec<QueryMeasure>,
    pub sort_dimensions: Vec<QueryDimension>,
    pub filter: Option<FilterExpr>,
}
