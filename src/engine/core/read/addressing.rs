use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::info;

use crate::engine::core::block::mapper as block_mapper;
use crate::engine::core::complex::builder::complex_dimension_trees;
use crate::engine::core::complex::query_type::GenericQueryType;
use crate::engine::core::dictionary::provider::{Dictionary, DictionaryProvider};
use crate::engine::core::dictionary::resolver::dimension_dictionaries;
use crate::engine::core::filter::extractor::complex_filter_dimensions;
use crate::engine::core::group::mapper as group_mapper;
use crate::engine::core::key::codec::KeyGenerator;
use crate::engine::core::key::structure::KeyStructureInfo;
use crate::engine::core::key::{mask, sort};
use crate::engine::core::read::query_model::QueryModel;
use crate::engine::core::segment::properties::SegmentProperties;
use crate::engine::errors::QueryCompileError;
use crate::engine::schema::catalog::TableSchema;

/// Everything the scan/read path needs to address one segment for one bound
/// query: key masks, block-index plans, dictionary handles and complex-type
/// trees. Built once per query-plan compilation; any failure aborts the
/// whole compilation.
#[derive(Debug)]
pub struct ScanAddressing {
    /// Mask structure over the packed row key for the projected dimensions.
    pub key_structure: KeyStructureInfo,
    /// Per column-group restructure info, keyed by physical block index.
    pub group_key_structures: FxHashMap<usize, KeyStructureInfo>,
    pub dimension_block_indexes: Vec<usize>,
    pub measure_block_indexes: Vec<usize>,
    pub dictionary_block_indexes: Vec<usize>,
    pub no_dictionary_block_indexes: Vec<usize>,
    /// Column id -> dictionary handle for surrogate decoding.
    pub dictionaries: FxHashMap<String, Arc<Dictionary>>,
    /// Dimension ordinal -> complex-type schema tree.
    pub complex_trees: FxHashMap<usize, GenericQueryType>,
    /// Per projected dimension, whether it is also a sort dimension.
    pub sort_dimension_flags: Vec<bool>,
    /// Per sort dimension, compare positions inside the compacted key.
    pub sort_byte_ranges: Vec<Option<Vec<usize>>>,
    /// Per sort dimension, its max key masked to the compacted positions.
    pub sort_masked_keys: Vec<Option<Vec<u8>>>,
}

/// Compiles the full addressing plan for one segment.
pub fn build_scan_addressing(
    model: &QueryModel,
    table: &TableSchema,
    segment: &SegmentProperties,
    provider: &dyn DictionaryProvider,
) -> Result<ScanAddressing, QueryCompileError> {
    let generator = segment.row_key_generator();

    let mask_byte_ranges = mask::masked_byte_range(&model.dimensions, &**generator);
    let max_key = mask::max_key_for_dimensions(&model.dimensions, &**generator)?;
    let masked_bytes = mask::compact_mask(generator.key_size_in_bytes(), &mask_byte_ranges);
    let key_structure = KeyStructureInfo {
        key_generator: Arc::clone(generator),
        mask_byte_ranges,
        max_key,
        masked_bytes,
    };

    let group_key_structures = group_mapper::group_key_structures(&model.dimensions, segment)?;

    let dimension_block_indexes = block_mapper::dimension_block_indexes(
        &model.dimensions,
        segment.dimension_block_map(),
        &[],
    );
    let measure_block_indexes = block_mapper::measure_block_indexes(
        &model.measures,
        &[],
        segment.measure_block_map(),
    );
    let (dictionary_block_indexes, no_dictionary_block_indexes) =
        block_mapper::partition_dimension_block_indexes(
            &model.dimensions,
            segment.dimension_block_map(),
        );

    let filter_dimensions = complex_filter_dimensions(model.filter.as_ref());
    let dictionaries =
        dimension_dictionaries(&model.dimensions, &filter_dimensions, table, provider)?;
    let complex_trees = complex_dimension_trees(
        &model.dimensions,
        segment.dimension_block_map(),
        segment.complex_value_sizes(),
        &dictionaries,
        &filter_dimensions,
    );

    let sort_dimension_flags = sort::sort_dimension_flags(&model.sort_dimensions, &model.dimensions);
    let sort_byte_ranges = sort::masked_byte_ranges_for_sorting(
        &model.sort_dimensions,
        &**generator,
        &key_structure.mask_byte_ranges,
    );
    let sort_masked_keys = sort::masked_keys_for_sorting(
        &model.sort_dimensions,
        &**generator,
        &sort_byte_ranges,
        &key_structure.mask_byte_ranges,
    )?;

    info!(
        target: "mdscan::addressing",
        table = %model.table.unique_name(),
        dimension_blocks = dimension_block_indexes.len(),
        measure_blocks = measure_block_indexes.len(),
        column_groups = group_key_structures.len(),
        dictionaries = dictionaries.len(),
        complex_trees = complex_trees.len(),
        "Compiled scan addressing"
    );
    Ok(ScanAddressing {
        key_structure,
        group_key_structures,
        dimension_block_indexes,
        measure_block_indexes,
        dictionary_block_indexes,
        no_dictionary_block_indexes,
        dictionaries,
        complex_trees,
        sort_dimension_flags,
        sort_byte_ranges,
        sort_masked_keys,
    })
}
