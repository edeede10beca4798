//! The fixed, argument-less pipeline binary.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use cricsheetdb_cli::run_pipeline;
use cricsheetdb_ingest::PipelineConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = PipelineConfig::default();

    let options = SqliteConnectOptions::new()
        .filename(&config.db_path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .with_context(|| format!("failed to open database {}", config.db_path.display()))?;

    // The connection must be released on every exit path, including a
    // failure part-way through a stage.
    let result = run_pipeline(&pool, &config).await;
    pool.close().await;

    let summary = result?;
    info!(
        total_rows = summary.total_rows,
        db = %config.db_path.display(),
        "database ready"
    );
    Ok(())
}
