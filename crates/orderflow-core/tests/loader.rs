use std::path::PathBuf;

use anyhow::Result;
use orderflow_core::{
    error::PipelineError,
    loader::{load_orders, tag_region},
    types::Region,
};
use polars::prelude::*;

fn fixture(name: &str) -> PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

#[test]
fn loads_fixture_with_inferred_types() -> Result<()> {
    let df = load_orders(&fixture("order_region_a.csv"))?;

    assert_eq!(df.height(), 6);
    assert_eq!(df.column("OrderId")?.dtype(), &DataType::Int64);
    assert_eq!(df.column("QuantityOrdered")?.dtype(), &DataType::Int64);
    assert_eq!(df.column("ItemPrice")?.dtype(), &DataType::Float64);
    assert_eq!(df.column("PromotionDiscount")?.dtype(), &DataType::String);
    // Extra columns ride along.
    assert!(df.column("ShipCity").is_ok());

    let promo = df.column("PromotionDiscount")?.str()?;
    assert!(promo.get(0).unwrap().contains(r#""Amount": "5.00""#));
    assert_eq!(promo.get(3), Some("garbage"));
    Ok(())
}

#[test]
fn missing_file_is_source_unreadable() {
    let err = load_orders(&fixture("no_such_region.csv")).unwrap_err();
    assert!(matches!(err, PipelineError::SourceUnreadable { .. }));
}

#[test]
fn empty_file_is_source_unreadable() {
    let err = load_orders(&fixture("empty.csv")).unwrap_err();
    assert!(matches!(err, PipelineError::SourceUnreadable { .. }));
}

#[test]
fn missing_required_column_is_reported_by_name() {
    let err = load_orders(&fixture("order_missing_price.csv")).unwrap_err();
    match err {
        PipelineError::MissingColumn { column, .. } => assert_eq!(column, "ItemPrice"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn tag_region_sets_literal_for_every_row() -> Result<()> {
    let df = load_orders(&fixture("order_region_b.csv"))?;
    let width = df.width();
    let tagged = tag_region(df, Region::B)?;

    assert_eq!(tagged.width(), width + 1);
    let regions = tagged.column("region")?.str()?;
    assert_eq!(regions.len(), 4);
    assert!(regions.into_iter().all(|value| value == Some("B")));
    Ok(())
}

#[test]
fn header_only_file_loads_with_no_rows() -> Result<()> {
    let df = load_orders(&fixture("order_region_b_header_only.csv"))?;

    assert_eq!(df.height(), 0);
    assert_eq!(df.width(), 6);
    for required in ["OrderId", "QuantityOrdered", "ItemPrice", "PromotionDiscount"] {
        assert!(df.column(required).is_ok(), "{required} should be present");
    }
    Ok(())
}
