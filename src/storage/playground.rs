//! Query playground and generic table tools.
//!
//! These run user-written SQL text. Errors from SQLite are passed through
//! untouched so the UI can show them verbatim. Table and column names that
//! end up interpolated into SQL are checked against the live schema first.

use super::{models::*, presets::suggested_query, schema::CricketDatabase};
use crate::error::{LiveStatsError, Result};
use rusqlite::params_from_iter;

pub const DEFAULT_TABLE_LIMIT: u32 = 200;
pub const MAX_TABLE_LIMIT: u32 = 10_000;

const SELECT_ONLY: &str = "Only SELECT queries are allowed here.";

/// Quote an identifier for interpolation into SQL text.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Strip surrounding whitespace and trailing semicolons so a single statement
/// typed into the box is accepted.
fn normalize_statement(sql: &str) -> &str {
    sql.trim().trim_end_matches(|c: char| c == ';' || c.is_whitespace())
}

impl CricketDatabase {
    /// Run one arbitrary statement from the playground.
    ///
    /// Statements that produce columns come back as rows; everything else
    /// reports the number of rows changed.
    pub fn run_query(&self, sql: &str) -> Result<QueryOutcome> {
        self.run_statement(sql, false)
    }

    /// Read-only variant: the statement must be a `SELECT` (or `WITH ... SELECT`)
    /// and SQLite must report it as read-only before anything runs.
    pub fn run_select(&self, sql: &str) -> Result<QueryResult> {
        let lowered = sql.trim_start().to_ascii_lowercase();
        if !(lowered.starts_with("select") || lowered.starts_with("with")) {
            return Err(LiveStatsError::query(SELECT_ONLY));
        }

        match self.run_statement(sql, true)? {
            QueryOutcome::Rows(result) => Ok(result),
            QueryOutcome::Affected { .. } => Err(LiveStatsError::query(SELECT_ONLY)),
        }
    }

    fn run_statement(&self, sql: &str, read_only: bool) -> Result<QueryOutcome> {
        let statement = normalize_statement(sql);
        if statement.is_empty() {
            return Err(LiveStatsError::query("Query is empty."));
        }

        let mut stmt = self.conn.prepare(statement)?;
        if read_only && (!stmt.readonly() || stmt.column_count() == 0) {
            return Err(LiveStatsError::query(SELECT_ONLY));
        }
        if stmt.column_count() == 0 {
            let rows = stmt.execute([])?;
            return Ok(QueryOutcome::Affected { rows });
        }

        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        let width = columns.len();

        let mut rows = Vec::new();
        let mut cursor = stmt.query([])?;
        while let Some(row) = cursor.next()? {
            let mut cells = Vec::with_capacity(width);
            for i in 0..width {
                cells.push(CellValue::from(row.get_ref(i)?));
            }
            rows.push(cells);
        }

        Ok(QueryOutcome::Rows(QueryResult { columns, rows }))
    }

    /// User tables, alphabetically
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut tables = Vec::new();
        for row in rows {
            tables.push(row?);
        }
        Ok(tables)
    }

    /// Columns of a table as reported by `PRAGMA table_info`
    pub fn table_schema(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        self.ensure_table(table)?;

        let sql = format!("PRAGMA table_info({})", quote_ident(table));
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(ColumnInfo {
                cid: row.get(0)?,
                name: row.get(1)?,
                data_type: row.get(2)?,
                not_null: row.get::<_, i64>(3)? != 0,
                default_value: row.get(4)?,
                primary_key: row.get::<_, i64>(5)? != 0,
            })
        })?;

        let mut columns = Vec::new();
        for row in rows {
            columns.push(row?);
        }
        Ok(columns)
    }

    pub fn count_rows(&self, table: &str) -> Result<i64> {
        self.ensure_table(table)?;
        let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(table));
        Ok(self.conn.query_row(&sql, [], |row| row.get(0))?)
    }

    /// First `limit` rows of a table together with the SQL used to read them.
    pub fn fetch_table(&self, table: &str, limit: u32) -> Result<(QueryResult, String)> {
        self.ensure_table(table)?;

        let limit = limit.clamp(1, MAX_TABLE_LIMIT);
        let sql = format!("SELECT * FROM {} LIMIT {};", quote_ident(table), limit);
        match self.run_query(&sql)? {
            QueryOutcome::Rows(result) => Ok((result, sql)),
            QueryOutcome::Affected { .. } => Ok((QueryResult::default(), sql)),
        }
    }

    /// Insert one row from `(column, value)` pairs. Blank values are left out
    /// so column defaults and autoincrement keys apply.
    pub fn insert_row(&mut self, table: &str, values: &[(String, String)]) -> Result<TableChange> {
        let schema = self.table_schema(table)?;

        let mut columns = Vec::new();
        let mut bound = Vec::new();
        for (column, value) in values {
            if value.trim().is_empty() {
                continue;
            }
            if !schema.iter().any(|c| &c.name == column) {
                return Err(LiveStatsError::InvalidColumn {
                    table: table.to_string(),
                    column: column.clone(),
                });
            }
            columns.push(quote_ident(column));
            bound.push(value.trim().to_string());
        }

        let sql = if columns.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES;", quote_ident(table))
        } else {
            let placeholders = vec!["?"; columns.len()].join(", ");
            format!(
                "INSERT INTO {} ({}) VALUES ({});",
                quote_ident(table),
                columns.join(", "),
                placeholders
            )
        };

        let affected = self
            .conn
            .execute(normalize_statement(&sql), params_from_iter(bound.iter()))?;
        Ok(TableChange { affected, sql })
    }

    /// Delete rows matching a user-written WHERE clause. An empty clause is refused.
    pub fn delete_rows(&mut self, table: &str, where_clause: &str) -> Result<TableChange> {
        let where_part = where_clause.trim();
        if where_part.is_empty() {
            return Err(LiveStatsError::query(
                "Refusing to delete without a WHERE clause.",
            ));
        }
        self.ensure_table(table)?;

        let sql = format!("DELETE FROM {} WHERE {};", quote_ident(table), where_part);
        let affected = self.conn.execute(normalize_statement(&sql), [])?;
        Ok(TableChange { affected, sql })
    }

    /// Run an UPDATE built from user-written SET and WHERE parts. Both are required.
    pub fn update_rows(
        &mut self,
        table: &str,
        set_clause: &str,
        where_clause: &str,
    ) -> Result<TableChange> {
        let set_part = set_clause.trim();
        let where_part = where_clause.trim();
        if set_part.is_empty() {
            return Err(LiveStatsError::query("SET clause cannot be empty."));
        }
        if where_part.is_empty() {
            return Err(LiveStatsError::query(
                "Refusing to update without a WHERE clause.",
            ));
        }
        self.ensure_table(table)?;

        let sql = format!(
            "UPDATE {} SET {} WHERE {};",
            quote_ident(table),
            set_part,
            where_part
        );
        let affected = self.conn.execute(normalize_statement(&sql), [])?;
        Ok(TableChange { affected, sql })
    }

    /// Starter text for the playground box given the tables picked in the explorer.
    /// Unknown table names are dropped.
    pub fn suggest_query(&self, selected: &[String]) -> Result<String> {
        let tables = self.list_tables()?;
        let selected: Vec<String> = selected
            .iter()
            .filter(|t| tables.contains(t))
            .cloned()
            .collect();

        let join_column = if selected.len() >= 2 {
            let left = self.table_schema(&selected[0])?;
            let right = self.table_schema(&selected[1])?;
            left.iter()
                .find(|l| right.iter().any(|r| r.name == l.name))
                .map(|c| c.name.clone())
        } else {
            None
        };

        Ok(suggested_query(&selected, join_column.as_deref()))
    }

    fn ensure_table(&self, table: &str) -> Result<()> {
        if self.list_tables()?.iter().any(|t| t == table) {
            Ok(())
        } else {
            Err(LiveStatsError::InvalidTable {
                table: table.to_string(),
            })
        }
    }
}
