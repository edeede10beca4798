//! Bulk CSV-to-table loading with advisory label checks.

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::config::TableSpec;
use crate::error::{IngestError, IngestResult};
use crate::frame::{CellValue, CsvFrame};
use crate::progress::LoadProgress;
use crate::schema::DELIVERY_COLUMNS;

/// How many distinct offending label values a mismatch finding lists.
const MISMATCH_SAMPLE_LIMIT: usize = 5;

/// Advisory finding for rows whose `match_type` differs from the declared
/// format. Never blocks insertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelMismatch {
    /// The declared format label.
    pub expected: String,
    /// Number of rows with a present, differing value.
    pub count: usize,
    /// Up to five distinct offending values, in first-occurrence order.
    pub samples: Vec<String>,
}

/// Result of loading one source file.
#[derive(Clone, Debug, Default)]
pub struct LoadOutcome {
    /// Number of data rows parsed from the file (header excluded).
    pub rows: usize,
    /// Label finding, when an expectation was configured and violated.
    pub label_mismatch: Option<LabelMismatch>,
}

/// Load one format's CSV into its table.
///
/// A missing source file is not an error: the table is left empty, a warning
/// is logged, and the outcome reports zero rows. Parse and database failures
/// abort the run. Returns the number of rows parsed, which by construction
/// equals the number appended.
pub async fn load(
    pool: &SqlitePool,
    spec: &TableSpec,
    batch_size: usize,
) -> IngestResult<LoadOutcome> {
    if batch_size == 0 {
        return Err(IngestError::Config(
            "batch_size must be at least 1".to_string(),
        ));
    }

    if !spec.csv_path.is_file() {
        warn!(
            table = %spec.table,
            path = %spec.csv_path.display(),
            "missing source CSV, leaving table empty"
        );
        return Ok(LoadOutcome::default());
    }

    let frame = CsvFrame::read(&spec.csv_path)?;

    let label_mismatch = spec
        .expected_match_type
        .as_deref()
        .and_then(|expected| check_labels(&frame, expected));
    if let Some(mismatch) = &label_mismatch {
        warn!(
            table = %spec.table,
            expected = %mismatch.expected,
            count = mismatch.count,
            samples = ?mismatch.samples,
            "rows with unexpected match_type"
        );
    }

    insert_rows(pool, &spec.table, &frame, batch_size).await?;
    info!(table = %spec.table, rows = frame.row_count(), "load complete");

    Ok(LoadOutcome {
        rows: frame.row_count(),
        label_mismatch,
    })
}

/// Count rows whose `match_type` is present and differs from `expected`.
fn check_labels(frame: &CsvFrame, expected: &str) -> Option<LabelMismatch> {
    let column = frame.column_index("match_type")?;

    let mut count = 0;
    let mut samples: Vec<String> = Vec::new();
    for row in 0..frame.row_count() {
        let Some(value) = frame.raw(row, column) else {
            continue;
        };
        if value == expected {
            continue;
        }
        count += 1;
        if samples.len() < MISMATCH_SAMPLE_LIMIT && !samples.iter().any(|seen| seen == value) {
            samples.push(value.to_string());
        }
    }

    (count > 0).then(|| LabelMismatch {
        expected: expected.to_string(),
        count,
        samples,
    })
}

/// Append every frame row to `table`, one transaction per batch.
async fn insert_rows(
    pool: &SqlitePool,
    table: &str,
    frame: &CsvFrame,
    batch_size: usize,
) -> IngestResult<()> {
    if frame.row_count() == 0 {
        return Ok(());
    }

    let columns = DELIVERY_COLUMNS
        .iter()
        .map(|column| format!("\"{}\"", column.name))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; DELIVERY_COLUMNS.len()].join(", ");
    let sql = format!("INSERT INTO {table} ({columns}) VALUES ({placeholders})");

    // Template columns absent from the file yield NULL; file columns outside
    // the template are dropped here.
    let plan: Vec<Option<usize>> = DELIVERY_COLUMNS
        .iter()
        .map(|column| frame.column_index(column.name))
        .collect();

    let batches = frame.row_count().div_ceil(batch_size);
    let progress = (batches > 1).then(|| LoadProgress::new(table, batches as u64));

    let mut next = 0;
    while next < frame.row_count() {
        let end = (next + batch_size).min(frame.row_count());
        let mut tx = pool.begin().await?;
        for row in next..end {
            let mut query = sqlx::query(&sql);
            for source in &plan {
                query = match source {
                    None => query.bind(Option::<String>::None),
                    Some(column) => match frame.cell(row, *column) {
                        CellValue::Null => query.bind(Option::<String>::None),
                        CellValue::Integer(value) => query.bind(value),
                        CellValue::Text(value) => query.bind(value),
                    },
                };
            }
            query.execute(&mut *tx).await?;
        }
        tx.commit().await?;
        if let Some(progress) = &progress {
            progress.inc();
        }
        next = end;
    }
    if let Some(progress) = progress {
        progress.finish();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn frame_from(content: &str) -> CsvFrame {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write fixture");
        CsvFrame::read(file.path()).expect("parse fixture")
    }

    #[test]
    fn matching_labels_produce_no_finding() {
        let frame = frame_from("match_type\nTest\nTest\n");
        assert_eq!(check_labels(&frame, "Test"), None);
    }

    #[test]
    fn mismatch_counts_present_differing_values_only() {
        let frame = frame_from("match_type\nODI\nTest\n\nODI\n");
        let mismatch = check_labels(&frame, "Test").expect("finding");
        assert_eq!(mismatch.count, 2);
        assert_eq!(mismatch.samples, ["ODI"]);
    }

    #[test]
    fn samples_keep_at_most_five_distinct_values() {
        let frame = frame_from("match_type\nA\nB\nC\nD\nE\nF\nA\n");
        let mismatch = check_labels(&frame, "Test").expect("finding");
        assert_eq!(mismatch.count, 7);
        assert_eq!(mismatch.samples, ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn file_without_match_type_column_skips_the_check() {
        let frame = frame_from("team\nIndia\n");
        assert_eq!(check_labels(&frame, "Test"), None);
    }
}
