use crate::engine::core::filter::expr::{ColumnRef, CompareOp, FilterExpr};
use crate::engine::core::filter::extractor::complex_filter_dimensions;
use crate::engine::schema::types::{DataType, Dimension};
use crate::engine::types::ScalarValue;
use crate::test_helpers::factories::DimensionFactory;

fn complex_dimension(name: &str, ordinal: usize) -> Dimension {
    DimensionFactory::new(name)
        .ordinal(ordinal)
        .data_type(DataType::Struct)
        .child(DimensionFactory::new("inner").create())
        .create()
}

fn resolved_ref(dimension: &Dimension) -> ColumnRef {
    ColumnRef {
        name: dimension.name.clone(),
        dimension: Some(dimension.clone()),
    }
}

fn compare(column: ColumnRef) -> FilterExpr {
    FilterExpr::Compare {
        column,
        op: CompareOp::Eq,
        value: ScalarValue::from("x"),
    }
}

#[test]
fn logical_root_collects_complex_dimensions_from_whole_subtree() {
    let nested = complex_dimension("nested", 2);
    let leaf = DimensionFactory::new("leaf").ordinal(0).create();
    let filter = FilterExpr::And(
        Box::new(FilterExpr::Not(Box::new(compare(resolved_ref(&nested))))),
        Box::new(compare(resolved_ref(&leaf))),
    );

    let dimensions = complex_filter_dimensions(Some(&filter));
    assert_eq!(dimensions.len(), 1);
    assert_eq!(dimensions[0].name, "nested");
}

#[test]
fn duplicate_references_collapse_to_one_entry() {
    let nested = complex_dimension("nested", 2);
    let filter = FilterExpr::Or(
        Box::new(compare(resolved_ref(&nested))),
        Box::new(compare(resolved_ref(&nested))),
    );

    let dimensions = complex_filter_dimensions(Some(&filter));
    assert_eq!(dimensions.len(), 1);
}

#[test]
fn leaf_comparison_root_is_not_descended() {
    let nested = complex_dimension("nested", 2);
    let filter = compare(resolved_ref(&nested));
    assert!(complex_filter_dimensions(Some(&filter)).is_empty());
}

#[test]
fn not_root_is_not_descended() {
    let nested = complex_dimension("nested", 2);
    let filter = FilterExpr::Not(Box::new(compare(resolved_ref(&nested))));
    assert!(complex_filter_dimensions(Some(&filter)).is_empty());
}

#[test]
fn unresolved_and_flat_references_are_ignored() {
    let leaf = DimensionFactory::new("leaf").ordinal(0).create();
    let filter = FilterExpr::And(
        Box::new(compare(ColumnRef::unresolved("unknown"))),
        Box::new(compare(resolved_ref(&leaf))),
    );
    assert!(complex_filter_dimensions(Some(&filter)).is_empty());
    assert!(complex_filter_dimensions(None).is_empty());
}
