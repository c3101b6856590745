use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

use crate::engine::core::read::query_model::{QueryDimension, QueryMeasure};
use crate::engine::schema::types::{Dimension, Encodings, Measure};

/// Physical block indexes the storage layer must read for the requested
/// dimensions. Dimensions sharing a group block resolve to one index, so the
/// result is a duplicate-free ascending set. Children of complex dimensions
/// are assigned the contiguous pre-order blocks following their parent;
/// per-child stored indexes are deliberately not consulted.
pub fn dimension_block_indexes(
    query_dimensions: &[QueryDimension],
    ordinal_to_block: &FxHashMap<usize, usize>,
    aggregation_dimensions: &[Dimension],
) -> Vec<usize> {
    let mut block_indexes = BTreeSet::new();
    for query_dimension in query_dimensions {
        add_dimension_block_indexes(
            &query_dimension.dimension,
            ordinal_to_block,
            &mut block_indexes,
        );
    }
    for dimension in aggregation_dimensions {
        add_dimension_block_indexes(dimension, ordinal_to_block, &mut block_indexes);
    }
    block_indexes.into_iter().collect()
}

fn add_dimension_block_indexes(
    dimension: &Dimension,
    ordinal_to_block: &FxHashMap<usize, usize>,
    block_indexes: &mut BTreeSet<usize>,
) {
    let Some(&block_index) = ordinal_to_block.get(&dimension.ordinal) else {
        return;
    };
    block_indexes.insert(block_index);
    add_children_block_indexes(block_index, block_indexes, dimension);
}

/// Assigns each descendant the next sequential block index in pre-order,
/// returning the last index consumed so sibling subtrees never collide.
fn add_children_block_indexes(
    start_block_index: usize,
    block_indexes: &mut BTreeSet<usize>,
    dimension: &Dimension,
) -> usize {
    let mut block_index = start_block_index;
    for child in &dimension.children {
        block_index += 1;
        block_indexes.insert(block_index);
        block_index = add_children_block_indexes(block_index, block_indexes, child);
    }
    block_index
}

/// Measure block indexes for the query measures plus any measures referenced
/// only inside expressions.
pub fn measure_block_indexes(
    query_measures: &[QueryMeasure],
    expression_measures: &[Measure],
    ordinal_to_block: &FxHashMap<usize, usize>,
) -> Vec<usize> {
    let mut block_indexes = BTreeSet::new();
    for query_measure in query_measures {
        if let Some(&block_index) = ordinal_to_block.get(&query_measure.measure.ordinal) {
            block_indexes.insert(block_index);
        }
    }
    for measure in expression_measures {
        if let Some(&block_index) = ordinal_to_block.get(&measure.ordinal) {
            block_indexes.insert(block_index);
        }
    }
    block_indexes.into_iter().collect()
}

/// Splits the projected leaf dimensions into dictionary-decoded and
/// raw-value block indexes, so row construction picks the right decode path
/// per block. Complex dimensions appear in neither; their blocks are handled
/// by the complex-type schema.
pub fn partition_dimension_block_indexes(
    query_dimensions: &[QueryDimension],
    ordinal_to_block: &FxHashMap<usize, usize>,
) -> (Vec<usize>, Vec<usize>) {
    let mut dictionary_block_indexes = BTreeSet::new();
    let mut no_dictionary_block_indexes = Vec::new();
    for query_dimension in query_dimensions {
        let dimension = &query_dimension.dimension;
        if dimension.child_count() > 0 {
            continue;
        }
        let Some(&block_index) = ordinal_to_block.get(&dimension.ordinal) else {
            continue;
        };
        if dimension.has_encoding(Encodings::DICTIONARY) {
            dictionary_block_indexes.insert(block_index);
        } else {
            no_dictionary_block_indexes.push(block_index);
        }
    }
    (
        dictionary_block_indexes.into_iter().collect(),
        no_dictionary_block_indexes,
    )
}
