//! Secondary indexes and planner statistics.

use sqlx::SqlitePool;
use tracing::info;

use crate::config::TableSpec;
use crate::error::IngestResult;

/// Fixed per-table index set: name suffix and indexed column list.
const INDEXES: [(&str, &str); 7] = [
    ("idx_match_id", "match_id"),
    ("idx_mt_season", "match_type, season"),
    ("idx_team_season", "team, season"),
    ("idx_batter", "batter"),
    ("idx_bowler", "bowler"),
    ("idx_winner", "winner"),
    ("idx_venue", "venue"),
];

/// Create the fixed secondary indexes for every configured table, then
/// refresh query-planner statistics. Safe to re-run; advisory for
/// performance only.
pub async fn build_indexes(pool: &SqlitePool, specs: &[TableSpec]) -> IngestResult<()> {
    for spec in specs {
        for (suffix, columns) in INDEXES {
            let sql = format!(
                "CREATE INDEX IF NOT EXISTS {table}_{suffix} ON {table}({columns})",
                table = spec.table,
            );
            sqlx::query(&sql).execute(pool).await?;
        }
        info!(table = %spec.table, indexes = INDEXES.len(), "indexes ready");
    }

    sqlx::query("ANALYZE").execute(pool).await?;
    Ok(())
}
