use comfy_table::Table;
use serde::Serialize;
use tracing::{info, warn};

use crate::db::{quote_ident, DbPool};
use crate::error::{PipelineError, Result};
use crate::schema::{NET_SALE, ORDER_ID, REGION, TOTAL_SALES};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionTotal {
    pub region: String,
    pub total_sales: Option<f64>,
}

/// Results of the post-load validation queries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub total_records: i64,
    /// Ordered by region.
    pub total_sales_by_region: Vec<RegionTotal>,
    /// `None` when the table is empty.
    pub avg_net_sale: Option<f64>,
    /// Non-null ids minus distinct ids. Anything but zero means the cleaner leaked a duplicate.
    pub duplicate_orders: i64,
}

pub async fn run_validation_queries(pool: &DbPool, table: &str) -> Result<ValidationReport> {
    let table = quote_ident(table);

    let total_records: i64 =
        sqlx::query_scalar(&format!("SELECT COUNT(*) AS total_records FROM {table}"))
            .fetch_one(pool)
            .await
            .map_err(PipelineError::QueryExecutionFailure)?;

    let region_rows: Vec<(Option<String>, Option<f64>)> = sqlx::query_as(&format!(
        "SELECT {region}, SUM({total}) AS total_sales FROM {table} GROUP BY {region} ORDER BY {region}",
        region = quote_ident(REGION),
        total = quote_ident(TOTAL_SALES),
    ))
    .fetch_all(pool)
    .await
    .map_err(PipelineError::QueryExecutionFailure)?;

    let avg_net_sale: Option<f64> = sqlx::query_scalar(&format!(
        "SELECT AVG({net}) AS avg_sales FROM {table}",
        net = quote_ident(NET_SALE),
    ))
    .fetch_one(pool)
    .await
    .map_err(PipelineError::QueryExecutionFailure)?;

    let duplicate_orders: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT({id}) - COUNT(DISTINCT {id}) AS duplicate_orders FROM {table}",
        id = quote_ident(ORDER_ID),
    ))
    .fetch_one(pool)
    .await
    .map_err(PipelineError::QueryExecutionFailure)?;

    let report = ValidationReport {
        total_records,
        total_sales_by_region: region_rows
            .into_iter()
            .map(|(region, total_sales)| RegionTotal {
                region: region.unwrap_or_default(),
                total_sales,
            })
            .collect(),
        avg_net_sale,
        duplicate_orders,
    };

    if report.duplicate_orders != 0 {
        warn!(
            duplicate_orders = report.duplicate_orders,
            "destination table contains duplicate order ids"
        );
    }
    info!(total_records = report.total_records, "validation queries complete");
    Ok(report)
}

impl ValidationReport {
    /// One table per query, in query order.
    pub fn render(&self) -> Vec<Table> {
        let mut total_records = Table::new();
        total_records
            .set_header(vec!["total_records"])
            .add_row(vec![self.total_records.to_string()]);

        let mut by_region = Table::new();
        by_region.set_header(vec!["region", "total_sales"]);
        for row in &self.total_sales_by_region {
            by_region.add_row(vec![row.region.clone(), format_optional(row.total_sales)]);
        }

        let mut avg_sales = Table::new();
        avg_sales
            .set_header(vec!["avg_sales"])
            .add_row(vec![format_optional(self.avg_net_sale)]);

        let mut duplicates = Table::new();
        duplicates
            .set_header(vec!["duplicate_orders"])
            .add_row(vec![self.duplicate_orders.to_string()]);

        vec![total_records, by_region, avg_sales, duplicates]
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "null".to_string(), |v| v.to_string())
}
