use chrono::{DateTime, Utc};
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::info;

use crate::{
    cleaner::{self, CleanStats},
    config::PipelineConfig,
    db::{self, DbPool},
    enrich,
    error::Result,
    loader, merger,
    report::{self, ValidationReport},
    sink,
    types::Region,
};

/// Output of the in-memory stages: tag, merge, enrich, clean.
#[derive(Debug)]
pub struct TransformOutput {
    pub dataframe: DataFrame,
    pub merged_rows: usize,
    pub stats: CleanStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub rows_region_a: usize,
    pub rows_region_b: usize,
    pub rows_merged: usize,
    pub duplicates_removed: usize,
    pub non_positive_removed: usize,
    pub rows_written: usize,
    pub destination_table: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    pub summary: PipelineSummary,
    pub report: ValidationReport,
}

/// Tag both regional frames, union them, derive the sales columns and clean the result.
pub fn transform(region_a: DataFrame, region_b: DataFrame) -> Result<TransformOutput> {
    let tagged_a = loader::tag_region(region_a, Region::A)?;
    let tagged_b = loader::tag_region(region_b, Region::B)?;

    let merged = merger::merge_regions(tagged_a, tagged_b)?;
    let merged_rows = merged.height();

    let enriched = enrich::enrich_orders(merged)?;
    let (dataframe, stats) = cleaner::clean(&enriched)?;

    Ok(TransformOutput {
        dataframe,
        merged_rows,
        stats,
    })
}

/// Run the whole batch: load, transform, overwrite the destination table, then query it.
///
/// The destination pool is acquired after the in-memory stages succeed and is closed
/// before returning, whether or not the write and report succeeded.
pub async fn run(config: &PipelineConfig) -> Result<PipelineOutcome> {
    config.validate()?;
    let started_at = Utc::now();

    let region_a = loader::load_orders(&config.region_a_path)?;
    let region_b = loader::load_orders(&config.region_b_path)?;
    let rows_region_a = region_a.height();
    let rows_region_b = region_b.height();

    let output = transform(region_a, region_b)?;

    let pool = db::connect(&config.destination_target).await?;
    let persisted =
        persist_and_report(&pool, &config.destination_table_name, &output.dataframe).await;
    db::close(pool).await;
    let (rows_written, report) = persisted?;

    let summary = PipelineSummary {
        started_at,
        finished_at: Utc::now(),
        rows_region_a,
        rows_region_b,
        rows_merged: output.merged_rows,
        duplicates_removed: output.stats.duplicates_removed,
        non_positive_removed: output.stats.non_positive_removed,
        rows_written,
        destination_table: config.destination_table_name.clone(),
    };

    info!(
        rows_written = summary.rows_written,
        table = %summary.destination_table,
        "pipeline run complete"
    );
    Ok(PipelineOutcome { summary, report })
}

async fn persist_and_report(
    pool: &DbPool,
    table: &str,
    df: &DataFrame,
) -> Result<(usize, ValidationReport)> {
    let rows_written = sink::write_overwrite(pool, table, df).await?;
    let report = report::run_validation_queries(pool, table).await?;
    Ok((rows_written, report))
}
