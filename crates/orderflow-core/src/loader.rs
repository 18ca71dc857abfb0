use std::path::Path;

use polars::prelude::*;
use tracing::{debug, info};

use crate::error::{PipelineError, Result};
use crate::schema::{REGION, REQUIRED_COLUMNS};
use crate::types::Region;

/// Read one regional order file. The header row names the columns and dtypes are
/// inferred from the full file contents.
pub fn load_orders(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(PipelineError::SourceUnreadable {
            path: path.to_path_buf(),
            reason: "file not found".to_string(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|err| PipelineError::SourceUnreadable {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

    if df.width() == 0 {
        return Err(PipelineError::SourceUnreadable {
            path: path.to_path_buf(),
            reason: "missing header row".to_string(),
        });
    }

    for required in REQUIRED_COLUMNS {
        if df.column(required).is_err() {
            return Err(PipelineError::MissingColumn {
                path: path.to_path_buf(),
                column: required.to_string(),
            });
        }
    }

    debug!(path = %path.display(), columns = df.width(), "parsed order file header");
    info!(path = %path.display(), rows = df.height(), "loaded order file");
    Ok(df)
}

/// Append the literal `region` column. An existing `region` column is replaced.
pub fn tag_region(mut df: DataFrame, region: Region) -> Result<DataFrame> {
    let rows = df.height();
    let tag = Series::new(REGION.into(), vec![region.as_str(); rows]);
    df.with_column(tag)?;
    debug!(%region, rows, "tagged region");
    Ok(df)
}
