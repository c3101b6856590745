use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::engine::core::key::codec::{BitPackedKeyGenerator, KeyGenerator};
use crate::engine::schema::types::{Dimension, Measure};

/// Per-data-segment physical layout, derived from the segment's dimension
/// list and dictionary cardinalities.
///
/// Expects dimensions in ordinal order with the members of a column group
/// adjacent, and group ids numbered 0.. in order of first appearance among
/// multi-member groups.
#[derive(Debug)]
pub struct SegmentProperties {
    dimensions: Vec<Dimension>,
    measures: Vec<Measure>,
    /// One entry per physical block owner: singletons for columnar
    /// dimensions, the full ordinal list for a shared column group.
    column_groups: Vec<Vec<usize>>,
    group_generators: FxHashMap<u32, Arc<dyn KeyGenerator>>,
    /// (group id, global dimension ordinal) -> position inside the group's
    /// own key generator.
    group_key_ordinals: FxHashMap<(u32, usize), usize>,
    row_key_generator: Arc<dyn KeyGenerator>,
    dimension_block_map: FxHashMap<usize, usize>,
    measure_block_map: FxHashMap<usize, usize>,
    /// Fixed value size per complex-type ordinal, -1 for variable length.
    complex_value_sizes: Vec<i32>,
}

impl SegmentProperties {
    /// `cardinalities` is indexed by dimension ordinal; entries for complex
    /// and non-dictionary dimensions are ignored.
    pub fn new(
        dimensions: Vec<Dimension>,
        measures: Vec<Measure>,
        cardinalities: &[u64],
        complex_value_sizes: Vec<i32>,
    ) -> Self {
        let column_groups = Self::build_column_groups(&dimensions);

        let mut key_dimensions: Vec<&Dimension> =
            dimensions.iter().filter(|d| d.key_ordinal.is_some()).collect();
        key_dimensions.sort_by_key(|d| d.key_ordinal);
        let key_cardinalities: Vec<u64> = key_dimensions
            .iter()
            .map(|d| cardinalities.get(d.ordinal).copied().unwrap_or(1))
            .collect();
        let row_key_generator: Arc<dyn KeyGenerator> =
            Arc::new(BitPackedKeyGenerator::from_cardinalities(&key_cardinalities));

        let mut group_generators: FxHashMap<u32, Arc<dyn KeyGenerator>> = FxHashMap::default();
        let mut group_key_ordinals: FxHashMap<(u32, usize), usize> = FxHashMap::default();
        for group in column_groups.iter().filter(|g| g.len() > 1) {
            let Some(group_id) = dimensions
                .iter()
                .find(|d| d.ordinal == group[0])
                .and_then(|d| d.column_group_id)
            else {
                continue;
            };
            let group_cardinalities: Vec<u64> = group
                .iter()
                .map(|&ordinal| cardinalities.get(ordinal).copied().unwrap_or(1))
                .collect();
            group_generators.insert(
                group_id,
                Arc::new(BitPackedKeyGenerator::from_cardinalities(&group_cardinalities)),
            );
            for (position, &ordinal) in group.iter().enumerate() {
                group_key_ordinals.insert((group_id, ordinal), position);
            }
        }

        let mut dimension_block_map = FxHashMap::default();
        let mut block_index = 0usize;
        for group in &column_groups {
            if group.len() > 1 {
                for &ordinal in group {
                    dimension_block_map.insert(ordinal, block_index);
                }
                block_index += 1;
            } else {
                let ordinal = group[0];
                dimension_block_map.insert(ordinal, block_index);
                // complex children occupy the contiguous blocks that follow
                let descendants = dimensions
                    .iter()
                    .find(|d| d.ordinal == ordinal)
                    .map(|d| d.descendant_count())
                    .unwrap_or(0);
                block_index += 1 + descendants;
            }
        }

        let measure_block_map = measures
            .iter()
            .enumerate()
            .map(|(index, measure)| (measure.ordinal, index))
            .collect();

        Self {
            dimensions,
            measures,
            column_groups,
            group_generators,
            group_key_ordinals,
            row_key_generator,
            dimension_block_map,
            measure_block_map,
            complex_value_sizes,
        }
    }

    fn build_column_groups(dimensions: &[Dimension]) -> Vec<Vec<usize>> {
        let mut groups: Vec<Vec<usize>> = Vec::new();
        let mut previous_group: Option<u32> = None;
        for dimension in dimensions {
            match (dimension.columnar, dimension.column_group_id) {
                (false, Some(group_id)) if previous_group == Some(group_id) => {
                    if let Some(current) = groups.last_mut() {
                        current.push(dimension.ordinal);
                    }
                }
                _ => groups.push(vec![dimension.ordinal]),
            }
            previous_group = if dimension.columnar {
                None
            } else {
                dimension.column_group_id
            };
        }
        groups
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    pub fn column_groups(&self) -> &[Vec<usize>] {
        &self.column_groups
    }

    pub fn row_key_generator(&self) -> &Arc<dyn KeyGenerator> {
        &self.row_key_generator
    }

    pub fn group_generator(&self, group_id: u32) -> Option<&Arc<dyn KeyGenerator>> {
        self.group_generators.get(&group_id)
    }

    /// Position of a global dimension ordinal inside its group's generator.
    pub fn group_key_ordinal(&self, group_id: u32, ordinal: usize) -> Option<usize> {
        self.group_key_ordinals.get(&(group_id, ordinal)).copied()
    }

    pub fn dimension_block_map(&self) -> &FxHashMap<usize, usize> {
        &self.dimension_block_map
    }

    pub fn measure_block_map(&self) -> &FxHashMap<usize, usize> {
        &self.measure_block_map
    }

    pub fn block_index_of(&self, ordinal: usize) -> Option<usize> {
        self.dimension_block_map.get(&ordinal).copied()
    }

    pub fn complex_value_sizes(&self) -> &[i32] {
        &self.complex_value_sizes
    }
}
