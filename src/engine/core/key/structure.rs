use std::sync::Arc;

use crate::engine::core::key::codec::{KeyCodecError, KeyGenerator};
use crate::engine::core::key::mask;

/// Addressing metadata for one packed key: built once per query-plan
/// compilation, immutable afterwards. One global instance covers the row-key
/// dimensions; each multi-column group gets its own.
#[derive(Debug, Clone)]
pub struct KeyStructureInfo {
    pub key_generator: Arc<dyn KeyGenerator>,
    /// Ascending byte positions relevant to the selected dimensions.
    pub mask_byte_ranges: Vec<usize>,
    /// Key with all selected dimensions' bits set, used to AND out the rest.
    pub max_key: Vec<u8>,
    /// Full-key-sized table mapping each source byte to its compacted
    /// position, -1 for excluded bytes.
    pub masked_bytes: Vec<i32>,
}

impl KeyStructureInfo {
    /// Resolves the full structure for the given key ordinals.
    pub fn for_ordinals(
        ordinals: &[usize],
        key_generator: Arc<dyn KeyGenerator>,
    ) -> Result<Self, KeyCodecError> {
        let mask_byte_ranges = mask::masked_byte_range_for_ordinals(ordinals, &*key_generator);
        let max_key = mask::max_key_for_ordinals(ordinals, &*key_generator)?;
        let masked_bytes = mask::compact_mask(key_generator.key_size_in_bytes(), &mask_byte_ranges);
        Ok(Self {
            key_generator,
            mask_byte_ranges,
            max_key,
            masked_bytes,
        })
    }

    /// Number of bytes in the compacted masked key.
    pub fn masked_key_size(&self) -> usize {
        self.mask_byte_ranges.len()
    }
}
