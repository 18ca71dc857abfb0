use std::collections::BTreeSet;

use polars::prelude::*;
use tracing::info;

use crate::error::{PipelineError, Result};

/// Union two tagged regional frames row-wise.
///
/// Both frames must carry the same column names. Frame B is realigned to A's
/// column order, so the union is by name rather than by position. When the same
/// column was inferred with different dtypes (an all-integer price column in one
/// file, decimals in the other) both sides are widened to their common supertype.
/// A side with no rows (a header-only file infers every column as String) first takes
/// the other side's dtypes, so it cannot widen real columns to String.
/// Output rows are all of A followed by all of B.
pub fn merge_regions(region_a: DataFrame, region_b: DataFrame) -> Result<DataFrame> {
    let names_a: BTreeSet<String> = column_names(&region_a);
    let names_b: BTreeSet<String> = column_names(&region_b);

    if names_a != names_b {
        return Err(PipelineError::SchemaMismatch {
            missing_in_a: names_b.difference(&names_a).cloned().collect(),
            missing_in_b: names_a.difference(&names_b).cloned().collect(),
        });
    }

    let mut region_a = region_a;
    let mut aligned_b = region_b.select(region_a.get_column_names_owned())?;
    if aligned_b.height() == 0 && region_a.height() > 0 {
        aligned_b = conform_dtypes(&aligned_b, &region_a)?;
    } else if region_a.height() == 0 && aligned_b.height() > 0 {
        region_a = conform_dtypes(&region_a, &aligned_b)?;
    }

    let rows_a = region_a.height();
    let rows_b = aligned_b.height();

    let merged = concat(
        [region_a.lazy(), aligned_b.lazy()],
        UnionArgs {
            to_supertypes: true,
            ..Default::default()
        },
    )?
    .collect()?;

    info!(rows_a, rows_b, rows = merged.height(), "merged regional sources");
    Ok(merged)
}

fn column_names(df: &DataFrame) -> BTreeSet<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

/// Cast every column of `empty` to the dtype of the same-named column in `reference`.
fn conform_dtypes(empty: &DataFrame, reference: &DataFrame) -> Result<DataFrame> {
    let columns = empty
        .get_columns()
        .iter()
        .map(|column| {
            let dtype = reference.column(column.name().as_str())?.dtype();
            column.cast(dtype)
        })
        .collect::<PolarsResult<Vec<Column>>>()?;
    Ok(DataFrame::new(columns)?)
}
