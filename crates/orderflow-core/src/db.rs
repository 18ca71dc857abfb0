use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::debug;

use crate::error::{PipelineError, Result};

pub type DbPool = Pool<Sqlite>;

/// Open a SQLite pool for the destination, creating the database file if needed.
///
/// The pool holds a single connection so `sqlite::memory:` targets stay one database
/// for the life of the pool.
pub async fn connect(target: &str) -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str(target)
        .map_err(PipelineError::DestinationWriteFailure)?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
        .map_err(PipelineError::DestinationWriteFailure)?;

    debug!(destination = target, "destination connection pool established");
    Ok(pool)
}

pub async fn close(pool: DbPool) {
    pool.close().await;
    debug!("destination connection pool closed");
}

/// Double-quote an identifier for interpolation into SQL text.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
