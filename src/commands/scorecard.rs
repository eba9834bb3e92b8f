//! Scorecard command implementation

use super::common::{build_client, mirror_scorecard, open_database, print_table};
use crate::{core::AppConfig, provider::Scorecard, MatchId, Result};

/// Column headers and string rows for one innings' batting card.
pub fn batting_table(card: &Scorecard, innings: usize) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = ["Batter", "Dismissal", "R", "B", "4s", "6s", "SR"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let rows = card
        .scorecard
        .get(innings)
        .map(|inn| {
            inn.batsman
                .iter()
                .map(|b| {
                    vec![
                        b.name.clone(),
                        b.dismissal.clone(),
                        b.runs.to_string(),
                        b.balls.to_string(),
                        b.fours.to_string(),
                        b.sixes.to_string(),
                        format!("{:.2}", b.strike_rate),
                    ]
                })
                .collect()
        })
        .unwrap_or_default();
    (headers, rows)
}

/// Column headers and string rows for one innings' bowling card.
pub fn bowling_table(card: &Scorecard, innings: usize) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = ["Bowler", "O", "M", "R", "W", "Econ"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let rows = card
        .scorecard
        .get(innings)
        .map(|inn| {
            inn.bowler
                .iter()
                .map(|b| {
                    vec![
                        b.name.clone(),
                        b.overs.to_string(),
                        b.maidens.to_string(),
                        b.runs.to_string(),
                        b.wickets.to_string(),
                        format!("{:.2}", b.economy),
                    ]
                })
                .collect()
        })
        .unwrap_or_default();
    (headers, rows)
}

/// Fetch one match scorecard and print each innings.
pub async fn handle_scorecard(
    config: &AppConfig,
    match_id: MatchId,
    as_json: bool,
    save: bool,
) -> Result<()> {
    let client = build_client(config)?;
    let card = client.scorecard(match_id).await?;

    if save {
        let mut db = open_database(config)?;
        let written = mirror_scorecard(&mut db, match_id, &card)?;
        if !as_json {
            println!("✓ {} stat rows saved for match {}", written, match_id);
        }
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(&card)?);
        return Ok(());
    }

    if card.scorecard.is_empty() {
        println!("No scorecard available for match {}.", match_id);
        return Ok(());
    }

    for (idx, innings) in card.scorecard.iter().enumerate() {
        println!("\nInnings {}: {}", idx + 1, innings.bat_team_name);
        let (headers, rows) = batting_table(&card, idx);
        print_table(&headers, &rows);
        println!();
        let (headers, rows) = bowling_table(&card, idx);
        print_table(&headers, &rows);
    }

    if let Some(status) = &card.status {
        println!("\n{}", status);
    }

    Ok(())
}
