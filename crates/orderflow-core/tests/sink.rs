use anyhow::Result;
use orderflow_core::{db, sink::write_overwrite};
use polars::prelude::*;
use tokio::runtime::Runtime;

#[test]
fn booleans_are_stored_as_integer_flags() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let target = format!("sqlite://{}", dir.path().join("flags.sqlite3").display());
    let df = df!(
        "OrderId" => [1i64, 2, 3],
        "IsBusinessOrder" => [Some(true), Some(false), None],
        "ShipCity" => [Some("Austin"), None, Some("Reno")],
        "net_sale" => [1.5, 2.0, 3.25]
    )?;

    let rt = Runtime::new()?;
    rt.block_on(async move {
        let pool = db::connect(&target).await?;
        let written = write_overwrite(&pool, "flags", &df).await?;
        assert_eq!(written, 3);

        let declared: String = sqlx::query_scalar(
            "SELECT type FROM pragma_table_info('flags') WHERE name = 'IsBusinessOrder'",
        )
        .fetch_one(&pool)
        .await?;
        assert_eq!(declared, "INTEGER");

        let rows: Vec<(i64, Option<i64>, Option<String>, f64)> = sqlx::query_as(
            r#"SELECT "OrderId", "IsBusinessOrder", "ShipCity", net_sale FROM flags ORDER BY "OrderId""#,
        )
        .fetch_all(&pool)
        .await?;
        db::close(pool).await;

        assert_eq!(
            rows,
            vec![
                (1, Some(1), Some("Austin".to_string()), 1.5),
                (2, Some(0), None, 2.0),
                (3, None, Some("Reno".to_string()), 3.25),
            ]
        );
        Ok::<_, anyhow::Error>(())
    })
}
