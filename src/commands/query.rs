//! SQL query and preset listing commands

use super::common::{open_database, print_table};
use crate::{
    core::AppConfig,
    error::LiveStatsError,
    storage::{preset, QueryOutcome, PRESET_QUERIES},
    Result,
};

/// Resolve the SQL to run from free text or a preset number.
pub fn resolve_sql(sql: Option<String>, preset_number: Option<usize>) -> Result<String> {
    match (sql, preset_number) {
        (Some(sql), _) if !sql.trim().is_empty() => Ok(sql),
        (_, Some(n)) => preset(n)
            .map(|q| q.sql.to_string())
            .ok_or_else(|| LiveStatsError::query(format!("No preset query numbered {}", n))),
        _ => Err(LiveStatsError::query("Query is empty.")),
    }
}

/// Run one statement against the local database and print the outcome.
pub fn handle_query(
    config: &AppConfig,
    sql: Option<String>,
    preset_number: Option<usize>,
    as_json: bool,
) -> Result<()> {
    let sql = resolve_sql(sql, preset_number)?;
    let db = open_database(config)?;
    let outcome = db.run_query(&sql)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        QueryOutcome::Rows(result) => {
            let rows: Vec<Vec<String>> = result
                .rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect();
            print_table(&result.columns, &rows);
            println!("({} rows)", rows.len());
        }
        QueryOutcome::Affected { rows } => println!("✓ {} rows affected", rows),
    }
    Ok(())
}

/// List the canned queries.
pub fn handle_presets(as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(PRESET_QUERIES)?);
        return Ok(());
    }
    for q in PRESET_QUERIES {
        println!("{:>2}. {}", q.number, q.title);
    }
    Ok(())
}
