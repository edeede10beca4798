//! Read-only data-quality checks and the sanity report.
//!
//! Every check is a pure query returning a structured result; none raises a
//! failure state. Rendering is separate so a stricter caller could escalate
//! on the counts instead of printing them.

use std::fmt;

use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::config::TableSpec;
use crate::error::IngestResult;

/// Row total and the per-`match_type` breakdown for one table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowCounts {
    /// Total rows in the table.
    pub total: i64,
    /// Rows grouped by `match_type`, label order ascending (NULL first).
    pub by_match_type: Vec<(Option<String>, i64)>,
}

/// NULL/blank counts for the key delivery columns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NullCounts {
    /// Rows where `team` is NULL or blank after trimming.
    pub team: i64,
    /// Rows where `batter` is NULL or blank after trimming.
    pub batter: i64,
    /// Rows where `bowler` is NULL or blank after trimming.
    pub bowler: i64,
    /// Rows where `runs_total` is NULL.
    pub runs_total: i64,
}

/// Range sanity for the numeric delivery columns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValueSanity {
    /// Rows where any of the `runs_*` columns is negative.
    pub negative_runs: i64,
    /// Rows where `over` is NULL.
    pub null_over: i64,
}

/// Top venues by row count, descending, at most five entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TopVenues(pub Vec<(Option<String>, i64)>);

/// All check results for one table.
#[derive(Clone, Debug)]
pub struct TableReport {
    /// Table name.
    pub table: String,
    /// Whether the label distribution section is rendered for this table.
    /// Set for tables loaded without an expected `match_type`.
    pub show_distribution: bool,
    /// Check 1: row counts.
    pub counts: RowCounts,
    /// Check 2: NULL/blank counts.
    pub nulls: NullCounts,
    /// Check 3: value sanity.
    pub sanity: ValueSanity,
    /// Check 5: top venues.
    pub venues: TopVenues,
}

/// The full sanity report across all configured tables.
#[derive(Clone, Debug)]
pub struct SanityReport {
    /// Per-table results, in configuration order.
    pub per_table: Vec<TableReport>,
}

/// Total rows and the `match_type` breakdown.
pub async fn row_counts(pool: &SqlitePool, table: &str) -> IngestResult<RowCounts> {
    let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await?;

    let rows = sqlx::query(&format!(
        "SELECT match_type, COUNT(*) AS c FROM {table} GROUP BY match_type ORDER BY match_type"
    ))
    .fetch_all(pool)
    .await?;

    let mut by_match_type = Vec::with_capacity(rows.len());
    for row in rows {
        let label: Option<String> = row.try_get("match_type")?;
        let count: i64 = row.try_get("c")?;
        by_match_type.push((label, count));
    }

    Ok(RowCounts {
        total,
        by_match_type,
    })
}

/// NULL/blank counts on `team`, `batter`, `bowler`, and `runs_total`.
pub async fn null_counts(pool: &SqlitePool, table: &str) -> IngestResult<NullCounts> {
    let row = sqlx::query(&format!(
        r#"
        SELECT
          SUM(CASE WHEN team IS NULL OR TRIM(team) = '' THEN 1 ELSE 0 END) AS null_team,
          SUM(CASE WHEN batter IS NULL OR TRIM(batter) = '' THEN 1 ELSE 0 END) AS null_batter,
          SUM(CASE WHEN bowler IS NULL OR TRIM(bowler) = '' THEN 1 ELSE 0 END) AS null_bowler,
          SUM(CASE WHEN runs_total IS NULL THEN 1 ELSE 0 END) AS null_runs
        FROM {table}
        "#
    ))
    .fetch_one(pool)
    .await?;

    // SUM over an empty table is NULL.
    Ok(NullCounts {
        team: row.try_get::<Option<i64>, _>("null_team")?.unwrap_or(0),
        batter: row.try_get::<Option<i64>, _>("null_batter")?.unwrap_or(0),
        bowler: row.try_get::<Option<i64>, _>("null_bowler")?.unwrap_or(0),
        runs_total: row.try_get::<Option<i64>, _>("null_runs")?.unwrap_or(0),
    })
}

/// Negative-run and NULL-`over` counts.
pub async fn value_sanity(pool: &SqlitePool, table: &str) -> IngestResult<ValueSanity> {
    let negative_runs: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM {table} WHERE runs_total < 0 OR runs_batter < 0 OR runs_extras < 0"
    ))
    .fetch_one(pool)
    .await?;

    let null_over: i64 =
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table} WHERE \"over\" IS NULL"))
            .fetch_one(pool)
            .await?;

    Ok(ValueSanity {
        negative_runs,
        null_over,
    })
}

/// Top five venues by row count, descending. Venue name breaks count ties so
/// the output is reproducible.
pub async fn top_venues(pool: &SqlitePool, table: &str) -> IngestResult<TopVenues> {
    let rows = sqlx::query(&format!(
        r#"
        SELECT venue, COUNT(*) AS c
        FROM {table}
        GROUP BY venue
        ORDER BY c DESC, venue
        LIMIT 5
        "#
    ))
    .fetch_all(pool)
    .await?;

    let mut venues = Vec::with_capacity(rows.len());
    for row in rows {
        let venue: Option<String> = row.try_get("venue")?;
        let count: i64 = row.try_get("c")?;
        venues.push((venue, count));
    }

    Ok(TopVenues(venues))
}

/// Run every check for every configured table, in the fixed order.
pub async fn run_report(pool: &SqlitePool, specs: &[TableSpec]) -> IngestResult<SanityReport> {
    let mut per_table = Vec::with_capacity(specs.len());
    for spec in specs {
        debug!(table = %spec.table, "running sanity checks");
        per_table.push(TableReport {
            table: spec.table.clone(),
            show_distribution: spec.expected_match_type.is_none(),
            counts: row_counts(pool, &spec.table).await?,
            nulls: null_counts(pool, &spec.table).await?,
            sanity: value_sanity(pool, &spec.table).await?,
            venues: top_venues(pool, &spec.table).await?,
        });
    }
    Ok(SanityReport { per_table })
}

fn label(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("<null>")
}

impl fmt::Display for SanityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==================== SANITY TESTS ====================")?;

        for report in &self.per_table {
            writeln!(f)?;
            writeln!(f, "> {}: rows={}", report.table, report.counts.total)?;
            for (value, count) in &report.counts.by_match_type {
                writeln!(f, "    {} : {}", label(value), count)?;
            }
        }

        for report in &self.per_table {
            writeln!(f)?;
            writeln!(f, "> NULL checks ({})", report.table)?;
            writeln!(f, "    team NULL/blank     : {}", report.nulls.team)?;
            writeln!(f, "    batter NULL/blank   : {}", report.nulls.batter)?;
            writeln!(f, "    bowler NULL/blank   : {}", report.nulls.bowler)?;
            writeln!(f, "    runs_total NULL     : {}", report.nulls.runs_total)?;
        }

        for report in &self.per_table {
            writeln!(f)?;
            writeln!(f, "> Value sanity ({})", report.table)?;
            writeln!(f, "    negative run rows   : {}", report.sanity.negative_runs)?;
            writeln!(f, "    NULL over rows      : {}", report.sanity.null_over)?;
        }

        for report in self.per_table.iter().filter(|r| r.show_distribution) {
            writeln!(f)?;
            writeln!(f, "> match_type distribution ({}):", report.table)?;
            for (value, count) in &report.counts.by_match_type {
                writeln!(f, "    {} : {}", label(value), count)?;
            }
        }

        for report in &self.per_table {
            writeln!(f)?;
            writeln!(f, "> Top venues ({})", report.table)?;
            for (venue, count) in &report.venues.0 {
                writeln!(f, "    {} : {}", label(venue), count)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "================== SANITY TESTS DONE =================")
    }
}
