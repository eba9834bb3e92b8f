//! Player search, profile and stats commands

use super::common::{build_client, open_database, print_table};
use crate::{
    core::AppConfig,
    provider::{profile_to_player, types::value_to_display, PlayerProfile},
    PlayerId, Result, StatKind,
};

/// `Label: value` lines shown for a profile; empty fields are skipped.
pub fn profile_lines(profile: &PlayerProfile) -> Vec<(String, String)> {
    let fields = [
        ("Name", &profile.name),
        ("Role", &profile.role),
        ("Batting style", &profile.batting_style),
        ("Bowling style", &profile.bowling_style),
        ("International team", &profile.intl_team),
        ("Teams", &profile.teams),
        ("Birth place", &profile.birth_place),
        ("Cricbuzz page", &profile.web_url),
    ];
    let mut lines: Vec<(String, String)> = fields
        .iter()
        .filter_map(|(label, value)| {
            value
                .as_ref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| (label.to_string(), v.clone()))
        })
        .collect();

    if let Some(rankings) = profile.rankings.as_ref().filter(|r| !r.is_empty()) {
        for (category, table) in [
            ("Batting rank", &rankings.bat),
            ("Bowling rank", &rankings.bowl),
            ("All-rounder rank", &rankings.all),
        ] {
            for (key, value) in table {
                lines.push((format!("{} ({})", category, key), value_to_display(value)));
            }
        }
    }
    lines
}

/// Search players by name, or show one player's profile when an id is given.
pub async fn handle_players(
    config: &AppConfig,
    name: Option<String>,
    player_id: Option<PlayerId>,
    as_json: bool,
    save: bool,
) -> Result<()> {
    let client = build_client(config)?;

    if let Some(id) = player_id {
        let profile = client.player_profile(id).await?;

        if save {
            let mut db = open_database(config)?;
            if let Some(player) = profile_to_player(&profile) {
                db.upsert_player(&player)?;
                if !as_json {
                    println!("✓ Player {} saved", player.name);
                }
            }
        }

        if as_json {
            println!("{}", serde_json::to_string_pretty(&profile)?);
        } else {
            for (label, value) in profile_lines(&profile) {
                println!("{}: {}", label, value);
            }
        }
        return Ok(());
    }

    let players = client.search_players(name.as_deref().unwrap_or("")).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&players)?);
    } else if players.is_empty() {
        println!("No players found.");
    } else {
        for p in players {
            println!(
                "{} {} ({}) DOB: {}",
                p.id,
                p.name,
                p.team_name.as_deref().unwrap_or("Unknown team"),
                p.dob.as_deref().unwrap_or("N/A")
            );
        }
    }
    Ok(())
}

/// Print a player's batting or bowling table, or the career summary when no kind is given.
pub async fn handle_player_stats(
    config: &AppConfig,
    player_id: PlayerId,
    kind: Option<StatKind>,
    as_json: bool,
) -> Result<()> {
    let client = build_client(config)?;
    let table = match kind {
        Some(kind) => client.player_stats(player_id, kind).await?,
        None => client.player_career(player_id).await?,
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else if table.is_empty() {
        println!("No stats available for player {}.", player_id);
    } else {
        print_table(&table.headers, &table.rows);
    }
    Ok(())
}
