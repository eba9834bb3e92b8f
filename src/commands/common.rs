//! Common utilities and helper functions shared across commands.
//!
//! The mirror helpers here are also used by the web handlers, so the CLI and
//! the browser write fetched data to the store the same way.

use tracing::{info, warn};

use crate::{
    core::AppConfig,
    provider::{scorecard_rows, CricbuzzClient, MatchRecord, Scorecard},
    storage::{CricketDatabase, Match},
    MatchId, Result,
};

/// Open the configured database file, creating it on first use.
pub fn open_database(config: &AppConfig) -> Result<CricketDatabase> {
    info!(path = %config.database_path.display(), "opening database");
    CricketDatabase::open(&config.database_path)
}

/// Build a provider client from configuration.
pub fn build_client(config: &AppConfig) -> Result<CricbuzzClient> {
    CricbuzzClient::from_config(config)
}

/// Upsert every fetched match. Returns how many rows were written.
pub fn mirror_matches(db: &mut CricketDatabase, records: &[MatchRecord]) -> Result<usize> {
    for record in records {
        db.upsert_match(&Match::from(record))?;
    }
    info!(count = records.len(), "mirrored live matches");
    Ok(records.len())
}

/// Write a scorecard's players and stat rows for one match.
///
/// The match row must exist for the stat foreign keys; when it has not been
/// mirrored yet a minimal row is created from the two batting sides. An empty
/// scorecard writes nothing.
pub fn mirror_scorecard(
    db: &mut CricketDatabase,
    match_id: MatchId,
    card: &Scorecard,
) -> Result<usize> {
    if card.scorecard.is_empty() {
        return Ok(0);
    }
    let rows = scorecard_rows(match_id, card);

    if db.get_match(match_id)?.is_none() {
        let mut teams = card
            .scorecard
            .iter()
            .map(|i| i.bat_team_name.clone())
            .filter(|t| !t.is_empty());
        let team1 = teams.next().unwrap_or_else(|| "Team 1".to_string());
        let team2 = teams
            .find(|t| *t != team1)
            .unwrap_or_else(|| "Team 2".to_string());
        let mut m = Match::new(match_id, team1, team2);
        m.status = card.status.clone();
        db.insert_match(&m)?;
    }

    for player in &rows.players {
        db.upsert_player(player)?;
    }
    let written = db.replace_match_scorecard(match_id, &rows.batting, &rows.bowling)?;
    info!(%match_id, players = rows.players.len(), stats = written, "mirrored scorecard");
    Ok(written)
}

/// Fetch live matches and mirror them.
///
/// The store is only touched after a successful fetch, so a provider failure
/// leaves previously stored matches as they were.
pub async fn refresh_live_matches(
    client: &CricbuzzClient,
    db: &mut CricketDatabase,
) -> Result<Vec<MatchRecord>> {
    let records = match client.live_matches().await {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "live matches fetch failed");
            return Err(e);
        }
    };
    mirror_matches(db, &records)?;
    Ok(records)
}

/// Print rows as aligned text columns.
pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:<width$}", c, width = widths.get(i).copied().unwrap_or(0)))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!("{}", line(headers));
    println!(
        "{}",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  ")
    );
    for row in rows {
        println!("{}", line(row));
    }
}
