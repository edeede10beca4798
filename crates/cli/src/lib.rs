//! Orchestration of the four-stage ingestion pipeline.

use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;

use cricsheetdb_ingest::{indexer, loader, schema, validator, PipelineConfig};

/// Per-table and total row counts from one pipeline run.
#[derive(Debug)]
pub struct PipelineSummary {
    /// Rows loaded per table, in configuration order.
    pub table_rows: Vec<(String, usize)>,
    /// Rows loaded across all tables.
    pub total_rows: usize,
}

/// Executes the pipeline end-to-end: schema init, per-format loads,
/// indexing, then the sanity report on stdout.
///
/// All stages share the caller's pool serially; the caller is responsible
/// for closing it on every exit path.
pub async fn run_pipeline(pool: &SqlitePool, config: &PipelineConfig) -> Result<PipelineSummary> {
    fs::create_dir_all(&config.base_dir).with_context(|| {
        format!(
            "unable to create data directory {}",
            config.base_dir.display()
        )
    })?;

    schema::init_schema(pool, &config.tables)
        .await
        .context("failed to initialize schema")?;

    let mut table_rows = Vec::with_capacity(config.tables.len());
    for spec in &config.tables {
        let started = Instant::now();
        let outcome = loader::load(pool, spec, config.batch_size)
            .await
            .with_context(|| format!("failed to load {}", spec.table))?;
        cricsheetdb_observe::record_load_latency(&spec.table, started.elapsed(), outcome.rows);
        info!(table = %spec.table, rows = outcome.rows, "loaded rows into table");
        table_rows.push((spec.table.clone(), outcome.rows));
    }

    let total_rows = table_rows.iter().map(|(_, rows)| rows).sum();
    info!(total_rows, "total rows loaded across all tables");

    let started = Instant::now();
    indexer::build_indexes(pool, &config.tables)
        .await
        .context("failed to build indexes")?;
    cricsheetdb_observe::record_index_latency(started.elapsed());

    let started = Instant::now();
    let report = validator::run_report(pool, &config.tables)
        .await
        .context("sanity checks failed")?;
    cricsheetdb_observe::record_validation_latency(started.elapsed());
    print!("{report}");

    Ok(PipelineSummary {
        table_rows,
        total_rows,
    })
}
