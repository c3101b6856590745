use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::engine::core::key::codec::KeyCodecError;
use crate::engine::core::key::structure::KeyStructureInfo;
use crate::engine::core::read::query_model::QueryDimension;
use crate::engine::core::segment::properties::SegmentProperties;

/// Groups the ordinals of non-columnar query dimensions by column group id.
/// The walk is over a stable sort, so members of one group land in one list
/// whatever order the query listed them in.
fn column_group_ordinals(dimensions: &[QueryDimension]) -> IndexMap<u32, Vec<usize>> {
    let mut sorted: Vec<&QueryDimension> = dimensions.iter().collect();
    sorted.sort_by_key(|qd| qd.dimension.column_group_id);

    let mut groups: IndexMap<u32, Vec<usize>> = IndexMap::new();
    let mut previous_group: Option<u32> = None;
    for query_dimension in sorted {
        let dimension = &query_dimension.dimension;
        if dimension.columnar {
            previous_group = dimension.column_group_id;
            continue;
        }
        let Some(group_id) = dimension.column_group_id else {
            previous_group = None;
            continue;
        };
        if previous_group == Some(group_id) {
            if let Some(current) = groups.get_mut(&group_id) {
                current.push(dimension.ordinal);
            }
        } else {
            groups.insert(group_id, vec![dimension.ordinal]);
        }
        previous_group = Some(group_id);
    }
    groups
}

/// One `KeyStructureInfo` per column group touched by the query, keyed by the
/// group's physical block index. The scanner uses these to unpack bit-level
/// sub-fields of a shared group block at read time.
pub fn group_key_structures(
    dimensions: &[QueryDimension],
    segment: &SegmentProperties,
) -> Result<FxHashMap<usize, KeyStructureInfo>, KeyCodecError> {
    let mut structures = FxHashMap::default();
    for (group_id, ordinals) in column_group_ordinals(dimensions) {
        let Some(generator) = segment.group_generator(group_id) else {
            warn!(
                target: "mdscan::group",
                group_id,
                "No key generator registered for column group, skipping"
            );
            continue;
        };
        let mut group_key_ordinals: Vec<usize> = ordinals
            .iter()
            .filter_map(|&ordinal| segment.group_key_ordinal(group_id, ordinal))
            .collect();
        group_key_ordinals.sort_unstable();

        let structure = KeyStructureInfo::for_ordinals(&group_key_ordinals, Arc::clone(generator))?;
        let Some(block_index) = segment.block_index_of(ordinals[0]) else {
            warn!(
                target: "mdscan::group",
                group_id,
                ordinal = ordinals[0],
                "Column group ordinal missing from block mapping, skipping"
            );
            continue;
        };
        debug!(
            target: "mdscan::group",
            group_id,
            block_index,
            members = ordinals.len(),
            "Resolved key structure for column group"
        );
        structures.insert(block_index, structure);
    }
    Ok(structures)
}

/// Group id of the multi-member column group containing `ordinal`, counted
/// over multi-member groups only; singleton groups (true columnar
/// dimensions) do not advance the count.
pub fn column_group_id(segment: &SegmentProperties, ordinal: usize) -> Option<u32> {
    let mut group_id = 0u32;
    for group in segment.column_groups() {
        if group.len() > 1 {
            if group.contains(&ordinal) {
                return Some(group_id);
            }
            group_id += 1;
        }
    }
    None
}

/// Key structure for exactly one filter column inside a column group, or
/// `None` when the ordinal belongs to no multi-member group.
pub fn key_structure_for_column(
    segment: &SegmentProperties,
    ordinal: usize,
) -> Result<Option<KeyStructureInfo>, KeyCodecError> {
    let Some(group_id) = column_group_id(segment, ordinal) else {
        return Ok(None);
    };
    let Some(generator) = segment.group_generator(group_id) else {
        return Ok(None);
    };
    let Some(group_key_ordinal) = segment.group_key_ordinal(group_id, ordinal) else {
        return Ok(None);
    };
    let structure = KeyStructureInfo::for_ordinals(&[group_key_ordinal], Arc::clone(generator))?;
    Ok(Some(structure))
}
