//! Pipeline configuration: the table/file mapping and tuning knobs.

use std::path::PathBuf;

/// One `(table, source file, expected label)` tuple.
#[derive(Clone, Debug)]
pub struct TableSpec {
    /// Target table name in the database.
    pub table: String,
    /// Path to the source CSV for this format.
    pub csv_path: PathBuf,
    /// Declared match format; `None` disables the label check.
    pub expected_match_type: Option<String>,
}

impl TableSpec {
    /// Create a table spec.
    pub fn new(
        table: impl Into<String>,
        csv_path: impl Into<PathBuf>,
        expected_match_type: Option<&str>,
    ) -> Self {
        TableSpec {
            table: table.into(),
            csv_path: csv_path.into(),
            expected_match_type: expected_match_type.map(str::to_string),
        }
    }
}

/// Full configuration for one pipeline run.
///
/// The [`Default`] instance reproduces the fixed production mapping; tests
/// build their own pointing at fixture files.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Root data directory, created if absent before any stage runs.
    pub base_dir: PathBuf,
    /// Output database file. Created on first run; never deleted.
    pub db_path: PathBuf,
    /// Rows per insert transaction. Any value >= 1 yields identical
    /// final table contents.
    pub batch_size: usize,
    /// The four format tables, in load order.
    pub tables: Vec<TableSpec>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let base_dir = PathBuf::from("cricsheet_data");
        let processed = base_dir.join("processed");

        PipelineConfig {
            base_dir,
            // The database lives outside the data directory.
            db_path: PathBuf::from("cricsheet_match_data.db"),
            batch_size: 50_000,
            tables: vec![
                TableSpec::new("test_table", processed.join("test.csv"), Some("Test")),
                TableSpec::new("odi_table", processed.join("ODI.csv"), Some("ODI")),
                TableSpec::new("t20_table", processed.join("T20.csv"), Some("T20")),
                // Cricsheet labels IPL deliveries as T20; no expectation is
                // enforced for this table.
                TableSpec::new("ipl_table", processed.join("IPL.csv"), None),
            ],
        }
    }
}
