use std::collections::HashSet;

use polars::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::schema::{NET_SALE, ORDER_ID};

/// Row counts removed by each cleaning step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanStats {
    pub duplicates_removed: usize,
    pub non_positive_removed: usize,
}

/// Keep the first row of every `OrderId` group, in the frame's current row order.
///
/// After a merge that means a region A row always wins over a region B row with the
/// same id. Ids are compared by their string form; null ids form a single group.
pub fn drop_duplicate_orders(df: &DataFrame) -> Result<DataFrame, PolarsError> {
    let id_column = df.column(ORDER_ID)?.cast(&DataType::String)?;
    let ids = id_column.str()?;

    let mut seen: HashSet<Option<&str>> = HashSet::with_capacity(df.height());
    let keep: Vec<bool> = ids.into_iter().map(|id| seen.insert(id)).collect();

    let mask = BooleanChunked::new("keep".into(), keep);
    df.filter(&mask)
}

/// Keep rows whose `net_sale` is strictly positive. Null never passes.
pub fn filter_positive_net_sale(df: &DataFrame) -> Result<DataFrame, PolarsError> {
    df.clone()
        .lazy()
        .filter(col(NET_SALE).gt(lit(0.0)))
        .collect()
}

/// Deduplicate, then filter. A duplicate group whose surviving row has a
/// non-positive net sale disappears entirely.
pub fn clean(df: &DataFrame) -> Result<(DataFrame, CleanStats), PolarsError> {
    let input_rows = df.height();
    let deduplicated = drop_duplicate_orders(df)?;
    let deduplicated_rows = deduplicated.height();
    let cleaned = filter_positive_net_sale(&deduplicated)?;

    let stats = CleanStats {
        duplicates_removed: input_rows - deduplicated_rows,
        non_positive_removed: deduplicated_rows - cleaned.height(),
    };

    info!(
        rows = cleaned.height(),
        duplicates_removed = stats.duplicates_removed,
        non_positive_removed = stats.non_positive_removed,
        "cleaned order rows"
    );
    Ok((cleaned, stats))
}
