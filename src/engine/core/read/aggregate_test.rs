use crate::engine::core::read::aggregate::{
    Aggregation, actual_value_aggregator_indexes, numeric_aggregator_indexes,
};

#[test]
fn sum_and_avg_are_numeric_slots() {
    let aggregations = [
        Aggregation::Count,
        Aggregation::Sum,
        Aggregation::Max,
        Aggregation::Avg,
    ];
    assert_eq!(numeric_aggregator_indexes(&aggregations), vec![1, 3]);
    assert_eq!(actual_value_aggregator_indexes(&aggregations), vec![0, 2]);
}

#[test]
fn partitions_cover_every_slot_exactly_once() {
    let aggregations = [
        Aggregation::Min,
        Aggregation::DistinctCount,
        Aggregation::Sum,
    ];
    let mut all = numeric_aggregator_indexes(&aggregations);
    all.extend(actual_value_aggregator_indexes(&aggregations));
    all.sort_unstable();
    assert_eq!(all, vec![0, 1, 2]);
}
