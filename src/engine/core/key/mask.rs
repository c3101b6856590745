use std::collections::BTreeSet;

use crate::engine::core::key::codec::{KeyCodecError, KeyGenerator};
use crate::engine::core::read::query_model::QueryDimension;

/// Ascending, duplicate-free byte positions covered by the selected
/// dimensions inside the packed key. Dimensions without a key ordinal
/// (complex and non-dictionary columns) never enter the key and are skipped.
pub fn masked_byte_range(
    dimensions: &[QueryDimension],
    generator: &dyn KeyGenerator,
) -> Vec<usize> {
    let mut byte_range_set = BTreeSet::new();
    for query_dimension in dimensions {
        let Some(key_ordinal) = query_dimension.dimension.key_ordinal else {
            continue;
        };
        let Some((start, end)) = generator.byte_range(key_ordinal) else {
            continue;
        };
        byte_range_set.extend(start..=end);
    }
    byte_range_set.into_iter().collect()
}

/// Same computation over raw key ordinals, for callers that already resolved
/// which ordinals matter (column-group members, single filter columns).
pub fn masked_byte_range_for_ordinals(
    ordinals: &[usize],
    generator: &dyn KeyGenerator,
) -> Vec<usize> {
    let mut byte_range_set = BTreeSet::new();
    for &ordinal in ordinals {
        let Some((start, end)) = generator.byte_range(ordinal) else {
            continue;
        };
        byte_range_set.extend(start..=end);
    }
    byte_range_set.into_iter().collect()
}

/// Key with every selected ordinal set to its maximum representable value and
/// all others zero. ANDing a stored key against this retains only the
/// selected dimensions' bits.
pub fn max_key_for_ordinals(
    ordinals: &[usize],
    generator: &dyn KeyGenerator,
) -> Result<Vec<u8>, KeyCodecError> {
    let mut max = vec![0u64; generator.dim_count()];
    for &ordinal in ordinals {
        if ordinal < max.len() {
            max[ordinal] = generator.max_value(ordinal);
        }
    }
    generator.encode(&max)
}

/// As [`max_key_for_ordinals`], selecting the key ordinals of the given
/// dimensions; columns outside the key are skipped.
pub fn max_key_for_dimensions(
    dimensions: &[QueryDimension],
    generator: &dyn KeyGenerator,
) -> Result<Vec<u8>, KeyCodecError> {
    let mut max = vec![0u64; generator.dim_count()];
    for query_dimension in dimensions {
        let Some(key_ordinal) = query_dimension.dimension.key_ordinal else {
            continue;
        };
        if key_ordinal < max.len() {
            max[key_ordinal] = generator.max_value(key_ordinal);
        }
    }
    generator.encode(&max)
}

/// Lookup table sized to the full key: position `i` holds the index of source
/// byte `i` inside the compacted masked key, or -1 when that byte is excluded.
pub fn compact_mask(key_size: usize, mask_byte_ranges: &[usize]) -> Vec<i32> {
    let mut masked = vec![-1i32; key_size];
    for (index, &byte) in mask_byte_ranges.iter().enumerate() {
        if byte < key_size {
            masked[byte] = index as i32;
        }
    }
    masked
}

/// Copies the selected bytes of `data` into a minimal buffer, ANDing each
/// against the same-positioned max-key byte so bits of unselected dimensions
/// sharing a byte are dropped too.
pub fn apply_mask(
    data: &[u8],
    max_key: &[u8],
    mask_byte_ranges: &[i32],
    byte_count: usize,
) -> Vec<u8> {
    let mut masked_key = Vec::with_capacity(byte_count);
    for i in 0..byte_count {
        let Some(&byte_range) = mask_byte_ranges.get(i) else {
            break;
        };
        if byte_range < 0 {
            continue;
        }
        let index = byte_range as usize;
        if let (Some(&data_byte), Some(&max_byte)) = (data.get(index), max_key.get(index)) {
            masked_key.push(data_byte & max_byte);
        }
    }
    masked_key
}
