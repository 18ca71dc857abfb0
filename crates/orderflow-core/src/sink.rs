use polars::prelude::*;
use sqlx::{Sqlite, Transaction};
use tracing::info;

use crate::db::{quote_ident, DbPool};
use crate::error::{PipelineError, Result};

/// A frame column coerced to one of the three SQLite storage classes we emit.
enum SinkColumn {
    Integer(Int64Chunked),
    Real(Float64Chunked),
    Text(StringChunked),
}

impl SinkColumn {
    fn from_column(column: &Column) -> Result<Self> {
        let dtype = column.dtype();
        let sink_column = if dtype.is_integer() || matches!(dtype, DataType::Boolean) {
            SinkColumn::Integer(column.cast(&DataType::Int64)?.i64()?.clone())
        } else if dtype.is_float() {
            SinkColumn::Real(column.cast(&DataType::Float64)?.f64()?.clone())
        } else {
            SinkColumn::Text(column.cast(&DataType::String)?.str()?.clone())
        };
        Ok(sink_column)
    }

    fn sql_type(&self) -> &'static str {
        match self {
            SinkColumn::Integer(_) => "INTEGER",
            SinkColumn::Real(_) => "REAL",
            SinkColumn::Text(_) => "TEXT",
        }
    }
}

/// Replace `table` with the rows of `df` inside one transaction.
///
/// The table is dropped, recreated from the frame's schema and filled. Any failure
/// rolls the transaction back, leaving the previous contents in place.
pub async fn write_overwrite(pool: &DbPool, table: &str, df: &DataFrame) -> Result<usize> {
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    let columns = df
        .get_columns()
        .iter()
        .map(SinkColumn::from_column)
        .collect::<Result<Vec<_>>>()?;

    let mut tx = pool
        .begin()
        .await
        .map_err(PipelineError::DestinationWriteFailure)?;

    recreate_table(&mut tx, table, &names, &columns).await?;
    let written = insert_rows(&mut tx, table, &names, &columns, df.height()).await?;

    tx.commit()
        .await
        .map_err(PipelineError::DestinationWriteFailure)?;

    info!(table, rows = written, "destination table overwritten");
    Ok(written)
}

async fn recreate_table(
    tx: &mut Transaction<'_, Sqlite>,
    table: &str,
    names: &[String],
    columns: &[SinkColumn],
) -> Result<()> {
    let drop_sql = format!("DROP TABLE IF EXISTS {}", quote_ident(table));
    sqlx::query(&drop_sql)
        .execute(tx.as_mut())
        .await
        .map_err(PipelineError::DestinationWriteFailure)?;

    let definitions: Vec<String> = names
        .iter()
        .zip(columns)
        .map(|(name, column)| format!("{} {}", quote_ident(name), column.sql_type()))
        .collect();
    let create_sql = format!(
        "CREATE TABLE {} ({})",
        quote_ident(table),
        definitions.join(", ")
    );
    sqlx::query(&create_sql)
        .execute(tx.as_mut())
        .await
        .map_err(PipelineError::DestinationWriteFailure)?;

    Ok(())
}

async fn insert_rows(
    tx: &mut Transaction<'_, Sqlite>,
    table: &str,
    names: &[String],
    columns: &[SinkColumn],
    height: usize,
) -> Result<usize> {
    let column_list: Vec<String> = names.iter().map(|name| quote_ident(name)).collect();
    let placeholders = vec!["?"; names.len()].join(", ");
    let insert_sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(table),
        column_list.join(", "),
        placeholders
    );

    for idx in 0..height {
        let mut query = sqlx::query(&insert_sql);
        for column in columns {
            query = match column {
                SinkColumn::Integer(values) => query.bind(values.get(idx)),
                SinkColumn::Real(values) => query.bind(values.get(idx)),
                SinkColumn::Text(values) => query.bind(values.get(idx)),
            };
        }
        query
            .execute(tx.as_mut())
            .await
            .map_err(PipelineError::DestinationWriteFailure)?;
    }

    Ok(height)
}
