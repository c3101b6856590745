use serde::{Deserialize, Serialize};

/// Aggregations the scan layer can be asked to prepare measure slots for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aggregation {
    Sum,
    Avg,
    Count,
    Min,
    Max,
    DistinctCount,
}

impl Aggregation {
    /// Sum and Avg accumulate over the numeric representation; everything
    /// else keeps the decoded value.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Aggregation::Sum | Aggregation::Avg)
    }
}

/// Slots whose aggregator runs over the numeric representation, in
/// declaration order.
pub fn numeric_aggregator_indexes(aggregations: &[Aggregation]) -> Vec<usize> {
    aggregations
        .iter()
        .enumerate()
        .filter(|(_, aggregation)| aggregation.is_numeric())
        .map(|(index, _)| index)
        .collect()
}

/// Slots whose aggregator needs the actual decoded value.
pub fn actual_value_aggregator_indexes(aggregations: &[Aggregation]) -> Vec<usize> {
    aggregations
        .iter()
        .enumerate()
        .filter(|(_, aggregation)| !aggregation.is_numeric())
        .map(|(index, _)| index)
        .collect()
}
