use std::collections::HashSet;

use polars::prelude::*;

use orderflow_core::cleaner::{clean, drop_duplicate_orders, filter_positive_net_sale, CleanStats};

#[test]
fn first_row_of_each_order_survives() -> PolarsResult<()> {
    let df = df!(
        "OrderId" => [Some(7i64), Some(8), Some(7), None, None, Some(8)],
        "region" => ["A", "A", "B", "A", "B", "B"],
        "net_sale" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
    )?;

    let deduplicated = drop_duplicate_orders(&df)?;
    let regions: Vec<Option<&str>> = deduplicated.column("region")?.str()?.into_iter().collect();
    let net: Vec<Option<f64>> = deduplicated.column("net_sale")?.f64()?.into_iter().collect();

    assert_eq!(deduplicated.height(), 3);
    assert_eq!(regions, vec![Some("A"), Some("A"), Some("A")]);
    assert_eq!(net, vec![Some(1.0), Some(2.0), Some(4.0)]);
    Ok(())
}

#[test]
fn string_order_ids_are_deduplicated() -> PolarsResult<()> {
    let df = df!(
        "OrderId" => ["X-1", "X-2", "X-1"],
        "net_sale" => [1.0, 1.0, 1.0]
    )?;

    assert_eq!(drop_duplicate_orders(&df)?.height(), 2);
    Ok(())
}

#[test]
fn filter_is_strictly_positive_and_drops_nulls() -> PolarsResult<()> {
    let df = df!(
        "OrderId" => [1i64, 2, 3, 4, 5],
        "net_sale" => [Some(0.01), Some(0.0), Some(-3.0), None, Some(12.0)]
    )?;

    let filtered = filter_positive_net_sale(&df)?;
    let ids: Vec<Option<i64>> = filtered.column("OrderId")?.i64()?.into_iter().collect();
    assert_eq!(ids, vec![Some(1), Some(5)]);
    Ok(())
}

#[test]
fn clean_deduplicates_before_filtering() -> PolarsResult<()> {
    // Order 1's first row is non-positive, so the positive duplicate never gets a chance.
    let df = df!(
        "OrderId" => [1i64, 1, 2, 2, 3],
        "net_sale" => [Some(-1.0), Some(10.0), Some(4.0), Some(5.0), None]
    )?;

    let (cleaned, stats) = clean(&df)?;

    let ids: Vec<Option<i64>> = cleaned.column("OrderId")?.i64()?.into_iter().collect();
    assert_eq!(ids, vec![Some(2)]);
    assert_eq!(cleaned.column("net_sale")?.f64()?.get(0), Some(4.0));
    assert_eq!(
        stats,
        CleanStats {
            duplicates_removed: 2,
            non_positive_removed: 2,
        }
    );
    Ok(())
}

#[test]
fn cleaned_rows_satisfy_invariants() -> PolarsResult<()> {
    let df = df!(
        "OrderId" => [5i64, 4, 5, 3, 2, 4, 1, 1],
        "net_sale" => [Some(3.0), None, Some(1.0), Some(0.0), Some(9.5), Some(2.0), Some(8.0), Some(-8.0)]
    )?;

    let (cleaned, _) = clean(&df)?;
    let ids = cleaned.column("OrderId")?.i64()?;
    let net = cleaned.column("net_sale")?.f64()?;

    let mut seen = HashSet::new();
    for idx in 0..cleaned.height() {
        assert!(seen.insert(ids.get(idx)), "duplicate id at row {idx}");
        assert!(net.get(idx).is_some_and(|value| value > 0.0));
    }
    Ok(())
}
