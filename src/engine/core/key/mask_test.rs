use crate::engine::core::key::codec::{BitPackedKeyGenerator, KeyGenerator};
use crate::engine::core::key::mask;
use crate::engine::schema::types::DataType;
use crate::test_helpers::factories::{DimensionFactory, query_dimension};

#[test]
fn masked_byte_range_covers_key_dimensions_and_skips_complex() {
    // ordinal 0 occupies bytes 0-1, ordinal 1 occupies byte 2
    let generator = BitPackedKeyGenerator::from_cardinalities(&[65536, 256]);
    let a = DimensionFactory::new("a").ordinal(0).key_ordinal(0).create();
    let b = DimensionFactory::new("b")
        .ordinal(1)
        .data_type(DataType::Struct)
        .child(DimensionFactory::new("b_inner").create())
        .create();
    let dimensions = vec![query_dimension(&a), query_dimension(&b)];

    let ranges = mask::masked_byte_range(&dimensions, &generator);
    assert_eq!(ranges, vec![0, 1]);
}

#[test]
fn masked_byte_range_is_ascending_and_deduplicated() {
    // both dimensions share byte 0
    let generator = BitPackedKeyGenerator::from_cardinalities(&[16, 16]);
    let a = DimensionFactory::new("a").ordinal(0).key_ordinal(0).create();
    let b = DimensionFactory::new("b").ordinal(1).key_ordinal(1).create();
    let dimensions = vec![query_dimension(&b), query_dimension(&a)];

    let ranges = mask::masked_byte_range(&dimensions, &generator);
    assert_eq!(ranges, vec![0]);
    assert!(ranges.len() <= generator.key_size_in_bytes());
}

#[test]
fn masked_byte_range_over_empty_input_is_empty() {
    let generator = BitPackedKeyGenerator::from_cardinalities(&[16, 16]);
    assert!(mask::masked_byte_range(&[], &generator).is_empty());
    assert!(mask::masked_byte_range_for_ordinals(&[], &generator).is_empty());
}

#[test]
fn masked_byte_range_skips_out_of_range_ordinals() {
    let generator = BitPackedKeyGenerator::from_cardinalities(&[16, 16]);
    assert!(mask::masked_byte_range_for_ordinals(&[7], &generator).is_empty());
}

#[test]
fn max_key_sets_selected_ordinal_bits_only() {
    let generator = BitPackedKeyGenerator::from_cardinalities(&[65536, 256]);
    let max_key = mask::max_key_for_ordinals(&[0], &generator).unwrap();
    assert_eq!(max_key, vec![0xFF, 0xFF, 0x00]);
}

#[test]
fn compact_mask_maps_selected_bytes_to_compacted_positions() {
    assert_eq!(mask::compact_mask(4, &[0, 1]), vec![0, 1, -1, -1]);
    assert_eq!(mask::compact_mask(5, &[1, 3]), vec![-1, 0, -1, 1, -1]);
}

#[test]
fn compact_mask_is_a_bijection_over_the_selected_ranges() {
    let ranges = vec![0, 2, 3, 7];
    let masked = mask::compact_mask(8, &ranges);
    for (compacted, &byte) in ranges.iter().enumerate() {
        assert_eq!(masked[byte], compacted as i32);
    }
    let excluded = masked.iter().filter(|&&entry| entry == -1).count();
    assert_eq!(excluded, 8 - ranges.len());
}

#[test]
fn apply_mask_retains_selected_bits_and_zeroes_the_rest() {
    // two 4-bit dimensions packed into one byte; select only ordinal 0
    let generator = BitPackedKeyGenerator::from_cardinalities(&[16, 16]);
    let source = generator.encode(&[5, 9]).unwrap();
    assert_eq!(source, vec![0x59]);

    let ranges = mask::masked_byte_range_for_ordinals(&[0], &generator);
    let max_key = mask::max_key_for_ordinals(&[0], &generator).unwrap();
    let masked_bytes = mask::compact_mask(generator.key_size_in_bytes(), &ranges);

    let masked = mask::apply_mask(&source, &max_key, &masked_bytes, masked_bytes.len());
    assert_eq!(masked, vec![0x50]);
}

#[test]
fn apply_mask_degrades_to_empty_on_malformed_input() {
    assert!(mask::apply_mask(&[], &[], &[], 0).is_empty());
    assert!(mask::apply_mask(&[0xFF], &[0xFF], &[-1, -1], 2).is_empty());
    // out-of-bounds source positions are skipped, not panicked on
    assert!(mask::apply_mask(&[0xFF], &[0xFF], &[9], 1).is_empty());
}
