use crate::engine::core::key::codec::{KeyCodecError, KeyGenerator};
use crate::engine::core::read::query_model::QueryDimension;
use crate::engine::schema::types::Encodings;

/// Per sort dimension, the byte positions to compare, re-expressed as indexes
/// into the already-compacted row-key mask. Non-dictionary and complex sort
/// dimensions get no entry; absolute positions missing from `masked_ranges`
/// are left untranslated.
pub fn masked_byte_ranges_for_sorting(
    sort_dimensions: &[QueryDimension],
    generator: &dyn KeyGenerator,
    masked_ranges: &[usize],
) -> Vec<Option<Vec<usize>>> {
    sort_dimensions
        .iter()
        .map(|query_dimension| {
            let dimension = &query_dimension.dimension;
            if !dimension.has_encoding(Encodings::DICTIONARY) || dimension.child_count() > 0 {
                return None;
            }
            let key_ordinal = dimension.key_ordinal?;
            let (start, end) = generator.byte_range(key_ordinal)?;
            let positions = (start..=end)
                .map(|position| {
                    masked_ranges
                        .iter()
                        .position(|&masked| masked == position)
                        .unwrap_or(position)
                })
                .collect();
            Some(positions)
        })
        .collect()
}

/// Per sort dimension, a maximum-bit key masked down to just that dimension's
/// compacted-key bytes. Lets the scanner compare rows on one sort dimension
/// without decoding the full key.
pub fn masked_keys_for_sorting(
    sort_dimensions: &[QueryDimension],
    generator: &dyn KeyGenerator,
    sort_byte_ranges: &[Option<Vec<usize>>],
    masked_ranges: &[usize],
) -> Result<Vec<Option<Vec<u8>>>, KeyCodecError> {
    let mut masked_keys = Vec::with_capacity(sort_dimensions.len());
    for (index, ranges) in sort_byte_ranges.iter().enumerate() {
        let (Some(ranges), Some(query_dimension)) = (ranges, sort_dimensions.get(index)) else {
            masked_keys.push(None);
            continue;
        };
        let Some(key_ordinal) = query_dimension.dimension.key_ordinal else {
            masked_keys.push(None);
            continue;
        };
        let mut key = vec![0u64; generator.dim_count()];
        if key_ordinal < key.len() {
            key[key_ordinal] = generator.max_value(key_ordinal);
        }
        let md_key = generator.encode(&key)?;
        let masked_md_key: Vec<u8> = masked_ranges
            .iter()
            .filter_map(|&range| md_key.get(range).copied())
            .collect();
        let masked = ranges
            .iter()
            .filter_map(|&range| masked_md_key.get(range).copied())
            .collect();
        masked_keys.push(Some(masked));
    }
    Ok(masked_keys)
}

/// Membership marker per projected dimension: true when it also appears in
/// the sort-key set, preserving projection order.
pub fn sort_dimension_flags(
    sort_dimensions: &[QueryDimension],
    query_dimensions: &[QueryDimension],
) -> Vec<bool> {
    query_dimensions
        .iter()
        .map(|query_dimension| {
            sort_dimensions
                .iter()
                .any(|sorted| sorted.dimension.column_id == query_dimension.dimension.column_id)
        })
        .collect()
}
