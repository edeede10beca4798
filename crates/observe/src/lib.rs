use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::info;

static TABLES_LOADED_TOTAL: AtomicU64 = AtomicU64::new(0);

fn duration_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Records one table's load latency and row count, incrementing the
/// tables-loaded counter.
pub fn record_load_latency(table: &str, duration: Duration, rows: usize) {
    let total = TABLES_LOADED_TOTAL.fetch_add(1, Ordering::Relaxed) + 1;
    info!(
        metric = "load_latency_ms",
        table,
        latency_ms = duration_ms(duration),
        rows,
        tables_loaded_total = total
    );
}

/// Records the index build latency for the whole run.
pub fn record_index_latency(duration: Duration) {
    info!(metric = "index_latency_ms", latency_ms = duration_ms(duration));
}

/// Records how long the sanity checks took.
pub fn record_validation_latency(duration: Duration) {
    info!(
        metric = "validation_latency_ms",
        latency_ms = duration_ms(duration)
    );
}
