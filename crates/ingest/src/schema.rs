//! The shared delivery table template and schema initialization.

use sqlx::SqlitePool;
use tracing::info;

use crate::config::TableSpec;
use crate::error::IngestResult;

/// SQL type of a template column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// TEXT affinity
    Text,
    /// INTEGER affinity
    Integer,
}

impl ColumnKind {
    fn sql(self) -> &'static str {
        match self {
            ColumnKind::Text => "TEXT",
            ColumnKind::Integer => "INTEGER",
        }
    }
}

/// One column of the shared delivery template.
#[derive(Clone, Copy, Debug)]
pub struct Column {
    /// Column name, exactly as it appears in source CSV headers.
    pub name: &'static str,
    /// Declared SQL type.
    pub kind: ColumnKind,
}

/// The 20-column delivery template shared by all four format tables:
/// 11 match-level columns repeated on every delivery, then 9 per-delivery
/// columns. No primary key or uniqueness constraint — duplicates are
/// possible and not guarded against.
pub const DELIVERY_COLUMNS: [Column; 20] = [
    Column { name: "match_id", kind: ColumnKind::Text },
    Column { name: "match_date", kind: ColumnKind::Text },
    Column { name: "match_type", kind: ColumnKind::Text },
    Column { name: "season", kind: ColumnKind::Text },
    Column { name: "city", kind: ColumnKind::Text },
    Column { name: "venue", kind: ColumnKind::Text },
    Column { name: "toss_winner", kind: ColumnKind::Text },
    Column { name: "toss_decision", kind: ColumnKind::Text },
    Column { name: "winner", kind: ColumnKind::Text },
    Column { name: "player_of_match", kind: ColumnKind::Text },
    Column { name: "teams", kind: ColumnKind::Text },
    Column { name: "team", kind: ColumnKind::Text },
    Column { name: "over", kind: ColumnKind::Integer },
    Column { name: "batter", kind: ColumnKind::Text },
    Column { name: "bowler", kind: ColumnKind::Text },
    Column { name: "non_striker", kind: ColumnKind::Text },
    Column { name: "runs_batter", kind: ColumnKind::Integer },
    Column { name: "runs_extras", kind: ColumnKind::Integer },
    Column { name: "runs_total", kind: ColumnKind::Integer },
    Column { name: "wicket", kind: ColumnKind::Text },
];

/// Build the CREATE TABLE statement for one format table.
///
/// Column names are quoted throughout — `over` is a SQL keyword.
pub fn create_table_sql(table: &str) -> String {
    let columns = DELIVERY_COLUMNS
        .iter()
        .map(|column| format!("    \"{}\" {}", column.name, column.kind.sql()))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("CREATE TABLE {table} (\n{columns}\n)")
}

/// Drop and recreate every configured table from the shared template.
///
/// Destroys any prior contents of these tables; the database file itself is
/// left in place. A DDL failure aborts the run.
pub async fn init_schema(pool: &SqlitePool, specs: &[TableSpec]) -> IngestResult<()> {
    for spec in specs {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", spec.table))
            .execute(pool)
            .await?;
        sqlx::query(&create_table_sql(&spec.table))
            .execute(pool)
            .await?;
        info!(table = %spec.table, "recreated table");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_has_twenty_columns() {
        assert_eq!(DELIVERY_COLUMNS.len(), 20);
    }

    #[test]
    fn integer_columns_are_over_and_runs() {
        let integers: Vec<&str> = DELIVERY_COLUMNS
            .iter()
            .filter(|c| c.kind == ColumnKind::Integer)
            .map(|c| c.name)
            .collect();
        assert_eq!(integers, ["over", "runs_batter", "runs_extras", "runs_total"]);
    }

    #[test]
    fn create_sql_quotes_every_column() {
        let sql = create_table_sql("test_table");
        assert!(sql.starts_with("CREATE TABLE test_table"));
        for column in DELIVERY_COLUMNS {
            assert!(sql.contains(&format!("\"{}\"", column.name)));
        }
        assert!(sql.contains("\"over\" INTEGER"));
        assert!(sql.contains("\"wicket\" TEXT"));
    }
}
