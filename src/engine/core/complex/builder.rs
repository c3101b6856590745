use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::engine::core::complex::query_type::GenericQueryType;
use crate::engine::core::dictionary::provider::Dictionary;
use crate::engine::core::read::query_model::QueryDimension;
use crate::engine::schema::types::{DataType, Dimension, Encodings};

/// Builds the complex-type schema tree for every top-level complex dimension
/// in the projection or filter set, keyed by dimension ordinal.
pub fn complex_dimension_trees(
    query_dimensions: &[QueryDimension],
    ordinal_to_block: &FxHashMap<usize, usize>,
    complex_value_sizes: &[i32],
    dictionaries: &FxHashMap<String, Arc<Dictionary>>,
    filter_dimensions: &[Dimension],
) -> FxHashMap<usize, GenericQueryType> {
    let mut trees = FxHashMap::default();
    for query_dimension in query_dimensions {
        let dimension = &query_dimension.dimension;
        if dimension.child_count() == 0 {
            continue;
        }
        if let Some((root, _)) =
            build_complex_tree(dimension, ordinal_to_block, complex_value_sizes, dictionaries)
        {
            trees.insert(dimension.ordinal, root);
        }
    }
    for dimension in filter_dimensions {
        if let Some((root, _)) =
            build_complex_tree(dimension, ordinal_to_block, complex_value_sizes, dictionaries)
        {
            trees.insert(dimension.ordinal, root);
        }
    }
    trees
}

/// Builds one tree mirroring the dimension's nested schema and returns it
/// with the last block index the subtree consumed, so callers can validate
/// block-count expectations.
pub fn build_complex_tree(
    dimension: &Dimension,
    ordinal_to_block: &FxHashMap<usize, usize>,
    complex_value_sizes: &[i32],
    dictionaries: &FxHashMap<String, Arc<Dictionary>>,
) -> Option<(GenericQueryType, usize)> {
    let parent_block_index = ordinal_to_block.get(&dimension.ordinal).copied()?;
    let (children, last_block_index) = build_children(
        dimension,
        parent_block_index,
        complex_value_sizes,
        dictionaries,
    );
    let root = match dimension.data_type {
        DataType::Array => GenericQueryType::Array {
            name: dimension.name.clone(),
            parent_name: dimension.name.clone(),
            block_index: parent_block_index,
            children,
        },
        _ => GenericQueryType::Struct {
            name: dimension.name.clone(),
            parent_name: dimension.name.clone(),
            block_index: parent_block_index,
            children,
        },
    };
    Some((root, last_block_index))
}

/// Depth-first child construction. The next free block index is threaded
/// through the recursion and returned, never shared, so sibling subtrees
/// consume disjoint contiguous index runs.
fn build_children(
    dimension: &Dimension,
    start_block_index: usize,
    complex_value_sizes: &[i32],
    dictionaries: &FxHashMap<String, Arc<Dictionary>>,
) -> (Vec<GenericQueryType>, usize) {
    let mut children = Vec::with_capacity(dimension.child_count());
    let mut block_index = start_block_index;
    for child in &dimension.children {
        block_index += 1;
        let node = match child.data_type {
            DataType::Array => {
                let (grandchildren, last) =
                    build_children(child, block_index, complex_value_sizes, dictionaries);
                let node = GenericQueryType::Array {
                    name: child.name.clone(),
                    parent_name: dimension.name.clone(),
                    block_index,
                    children: grandchildren,
                };
                block_index = last;
                node
            }
            DataType::Struct => {
                let (grandchildren, last) =
                    build_children(child, block_index, complex_value_sizes, dictionaries);
                let node = GenericQueryType::Struct {
                    name: child.name.clone(),
                    parent_name: dimension.name.clone(),
                    block_index,
                    children: grandchildren,
                };
                block_index = last;
                node
            }
            _ => GenericQueryType::Primitive {
                name: child.name.clone(),
                parent_name: dimension.name.clone(),
                block_index,
                data_type: child.data_type,
                fixed_length: child
                    .complex_type_ordinal
                    .and_then(|ordinal| complex_value_sizes.get(ordinal))
                    .and_then(|&size| usize::try_from(size).ok()),
                dictionary: dictionaries.get(&child.column_id).cloned(),
                direct_dictionary: child.has_encoding(Encodings::DIRECT_DICTIONARY),
            },
        };
        children.push(node);
    }
    (children, block_index)
}
