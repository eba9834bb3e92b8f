//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use cricbuzz_livestats::{
    cli::{Commands, GetCmd, LiveStats},
    commands::{
        live_matches::handle_live_matches,
        players::{handle_player_stats, handle_players},
        query::{handle_presets, handle_query},
        scorecard::handle_scorecard,
    },
    web::run_server,
    AppConfig,
};
use tracing_subscriber::EnvFilter;

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = LiveStats::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(db) = cli.db {
        config.database_path = db;
    }
    if let Some(addr) = cli.addr {
        config.bind_addr = addr;
    }

    match cli.command {
        Commands::Serve => run_server(config).await?,

        Commands::Get { cmd } => match cmd {
            GetCmd::LiveMatches {
                series,
                json,
                save,
                clear_db,
            } => handle_live_matches(&config, series, json, save, clear_db).await?,

            GetCmd::Scorecard {
                match_id,
                json,
                save,
            } => handle_scorecard(&config, match_id, json, save).await?,

            GetCmd::Players {
                name,
                player_id,
                json,
                save,
            } => handle_players(&config, name, player_id, json, save).await?,

            GetCmd::PlayerStats {
                player_id,
                kind,
                json,
            } => handle_player_stats(&config, player_id, kind, json).await?,
        },

        Commands::Query { sql, preset, json } => handle_query(&config, sql, preset, json)?,

        Commands::Presets { json } => handle_presets(json)?,
    }

    Ok(())
}
