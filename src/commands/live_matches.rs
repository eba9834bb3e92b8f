//! Live matches command implementation

use std::collections::BTreeMap;

use super::common::{build_client, open_database, refresh_live_matches};
use crate::{
    core::AppConfig,
    provider::{format_score, format_time, MatchRecord},
    Result,
};

/// Group records by `Series (Type)`, keeping feed order inside each group.
pub fn group_by_series(records: &[MatchRecord]) -> BTreeMap<String, Vec<&MatchRecord>> {
    let mut groups: BTreeMap<String, Vec<&MatchRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.series_label()).or_default().push(record);
    }
    groups
}

/// Keep only matches whose series label or name contains `series` (case-insensitive).
pub fn filter_series(records: Vec<MatchRecord>, series: Option<&str>) -> Vec<MatchRecord> {
    let Some(needle) = series.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty()) else {
        return records;
    };
    records
        .into_iter()
        .filter(|r| r.series_label().to_lowercase().contains(&needle))
        .collect()
}

/// Fetch live matches, optionally mirror them, and print them grouped by series.
pub async fn handle_live_matches(
    config: &AppConfig,
    series: Option<String>,
    as_json: bool,
    save: bool,
    clear_db: bool,
) -> Result<()> {
    let client = build_client(config)?;

    let records = if save || clear_db {
        let mut db = open_database(config)?;
        if clear_db {
            println!("Clearing all database data...");
            db.clear_all_data()?;
            println!("✓ Database cleared successfully!");
        }
        let records = refresh_live_matches(&client, &mut db).await?;
        if !as_json {
            println!("✓ {} matches saved to {}", records.len(), config.database_path.display());
        }
        records
    } else {
        client.live_matches().await?
    };

    let records = filter_series(records, series.as_deref());

    if as_json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No live matches right now.");
        return Ok(());
    }

    for (label, matches) in group_by_series(&records) {
        println!("\n{}", label);
        for m in matches {
            println!(
                "  [{}] {} vs {} - {}",
                m.match_id,
                m.team1,
                m.team2,
                m.match_desc.as_deref().unwrap_or("")
            );
            println!(
                "      {}: {}   {}: {}",
                m.team1_short.as_deref().unwrap_or(&m.team1),
                format_score(m.team1_score),
                m.team2_short.as_deref().unwrap_or(&m.team2),
                format_score(m.team2_score)
            );
            println!(
                "      {} | {} | starts {}",
                m.state.as_deref().unwrap_or("Unknown"),
                m.status.as_deref().unwrap_or(""),
                format_time(m.start_time)
            );
            if let Some(venue) = &m.venue {
                println!(
                    "      {}{}",
                    venue,
                    m.city.as_deref().map(|c| format!(", {}", c)).unwrap_or_default()
                );
            }
        }
    }

    Ok(())
}
