use crate::engine::core::key::codec::BitPackedKeyGenerator;
use crate::engine::core::key::{mask, sort};
use crate::test_helpers::factories::{DimensionFactory, query_dimension};

fn three_byte_generator() -> BitPackedKeyGenerator {
    // one byte per ordinal
    BitPackedKeyGenerator::from_cardinalities(&[256, 256, 256])
}

#[test]
fn sort_ranges_are_rewritten_into_compacted_positions() {
    let generator = three_byte_generator();
    let d1 = DimensionFactory::new("d1").ordinal(1).key_ordinal(1).create();
    let d2 = DimensionFactory::new("d2").ordinal(2).key_ordinal(2).create();
    let projection = vec![query_dimension(&d1), query_dimension(&d2)];
    let masked_ranges = mask::masked_byte_range(&projection, &generator);
    assert_eq!(masked_ranges, vec![1, 2]);

    let sort_dimensions = vec![query_dimension(&d2)];
    let ranges = sort::masked_byte_ranges_for_sorting(&sort_dimensions, &generator, &masked_ranges);
    // absolute byte 2 sits at position 1 of the compacted key
    assert_eq!(ranges, vec![Some(vec![1])]);
}

#[test]
fn non_dictionary_and_complex_sort_dimensions_get_no_entry() {
    let generator = three_byte_generator();
    let plain = DimensionFactory::new("plain")
        .ordinal(0)
        .no_dictionary()
        .create();
    let nested = DimensionFactory::new("nested")
        .ordinal(1)
        .child(DimensionFactory::new("inner").create())
        .create();
    let sort_dimensions = vec![query_dimension(&plain), query_dimension(&nested)];

    let ranges = sort::masked_byte_ranges_for_sorting(&sort_dimensions, &generator, &[0, 1, 2]);
    assert_eq!(ranges, vec![None, None]);
}

#[test]
fn masked_keys_cover_single_sort_dimension_bits() {
    let generator = three_byte_generator();
    let d1 = DimensionFactory::new("d1").ordinal(1).key_ordinal(1).create();
    let d2 = DimensionFactory::new("d2").ordinal(2).key_ordinal(2).create();
    let projection = vec![query_dimension(&d1), query_dimension(&d2)];
    let masked_ranges = mask::masked_byte_range(&projection, &generator);

    let sort_dimensions = vec![query_dimension(&d1)];
    let sort_ranges =
        sort::masked_byte_ranges_for_sorting(&sort_dimensions, &generator, &masked_ranges);
    let masked_keys = sort::masked_keys_for_sorting(
        &sort_dimensions,
        &generator,
        &sort_ranges,
        &masked_ranges,
    )
    .unwrap();

    // d1's max key masked down to its own compacted byte
    assert_eq!(masked_keys, vec![Some(vec![0xFF])]);
}

#[test]
fn masked_keys_keep_absent_entries_aligned() {
    let generator = three_byte_generator();
    let plain = DimensionFactory::new("plain")
        .ordinal(0)
        .no_dictionary()
        .create();
    let d1 = DimensionFactory::new("d1").ordinal(1).key_ordinal(1).create();
    let sort_dimensions = vec![query_dimension(&plain), query_dimension(&d1)];
    let masked_ranges = vec![1];

    let sort_ranges =
        sort::masked_byte_ranges_for_sorting(&sort_dimensions, &generator, &masked_ranges);
    assert_eq!(sort_ranges, vec![None, Some(vec![0])]);

    let masked_keys = sort::masked_keys_for_sorting(
        &sort_dimensions,
        &generator,
        &sort_ranges,
        &masked_ranges,
    )
    .unwrap();
    assert_eq!(masked_keys, vec![None, Some(vec![0xFF])]);
}

#[test]
fn sort_flags_preserve_projection_order() {
    let d0 = DimensionFactory::new("d0").ordinal(0).key_ordinal(0).create();
    let d1 = DimensionFactory::new("d1").ordinal(1).key_ordinal(1).create();
    let d2 = DimensionFactory::new("d2").ordinal(2).key_ordinal(2).create();
    let projection = vec![
        query_dimension(&d0),
        query_dimension(&d1),
        query_dimension(&d2),
    ];
    let sort_dimensions = vec![query_dimension(&d1)];

    let flags = sort::sort_dimension_flags(&sort_dimensions, &projection);
    assert_eq!(flags, vec![false, true, false]);
}
