use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use tracing::info;

use crate::schema::{
    ITEM_PRICE, NET_SALE, PROMOTION_DISCOUNT, PROMOTION_DISCOUNT_AMOUNT, QUANTITY_ORDERED,
    TOTAL_SALES,
};

/// Matches the `"Amount": "<number>"` entry inside a promotion discount blob. Group 1
/// is the bare number without quotes.
pub const DISCOUNT_AMOUNT_PATTERN: &str = r#""Amount":\s*"(\d+\.?\d*)""#;

static DISCOUNT_AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(DISCOUNT_AMOUNT_PATTERN).expect("discount amount pattern is valid")
});

/// Scalar form of the discount extraction applied by [`enrich_orders`].
pub fn extract_discount_amount(text: &str) -> Option<f64> {
    DISCOUNT_AMOUNT_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|amount| amount.as_str().parse().ok())
}

/// Derive `PromotionDiscountAmount`, `total_sales` and `net_sale`.
///
/// Every derivation is row-local and null-propagating. Malformed discount text
/// yields a null amount (and so a null net sale) instead of an error.
pub fn enrich_orders(df: DataFrame) -> Result<DataFrame, PolarsError> {
    let enriched = df
        .lazy()
        .with_column(
            col(PROMOTION_DISCOUNT)
                .cast(DataType::String)
                .str()
                .extract(lit(DISCOUNT_AMOUNT_PATTERN), 1)
                .cast(DataType::Float64)
                .alias(PROMOTION_DISCOUNT_AMOUNT),
        )
        .with_column(
            (col(QUANTITY_ORDERED).cast(DataType::Float64)
                * col(ITEM_PRICE).cast(DataType::Float64))
            .alias(TOTAL_SALES),
        )
        .with_column((col(TOTAL_SALES) - col(PROMOTION_DISCOUNT_AMOUNT)).alias(NET_SALE))
        .collect()?;

    info!(
        rows = enriched.height(),
        missing_discount = enriched.column(PROMOTION_DISCOUNT_AMOUNT)?.null_count(),
        missing_net_sale = enriched.column(NET_SALE)?.null_count(),
        "derived sales columns"
    );
    Ok(enriched)
}
