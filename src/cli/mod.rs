//! CLI argument definitions and parsing.

pub mod types;

use std::{net::SocketAddr, path::PathBuf};

use clap::{Parser, Subcommand};
use types::{MatchId, PlayerId, StatKind};

#[derive(Debug, Subcommand)]
pub enum GetCmd {
    /// Fetch current live matches, grouped by series.
    LiveMatches {
        /// Only show series whose name contains this text (case-insensitive).
        #[clap(long, short)]
        series: Option<String>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,

        /// Mirror the fetched matches into the local database.
        #[clap(long)]
        save: bool,

        /// Clear all data from the database before fetching (implies --save)
        #[clap(long)]
        clear_db: bool,
    },

    /// Fetch the scorecard of one match.
    Scorecard {
        /// Cricbuzz match id.
        match_id: MatchId,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,

        /// Mirror players and stat rows into the local database.
        #[clap(long)]
        save: bool,
    },

    /// Search players by name, or show one profile with `--player-id`.
    Players {
        /// Name (or part of it) to search for.
        #[clap(long, short = 'n')]
        name: Option<String>,

        /// Show this player's profile instead of searching.
        #[clap(long, short = 'p')]
        player_id: Option<PlayerId>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,

        /// Save the fetched profile into the local database.
        #[clap(long)]
        save: bool,
    },

    /// Show one player's batting or bowling table, or the career summary.
    PlayerStats {
        player_id: PlayerId,

        /// `batting` or `bowling`; omit for the career summary.
        #[clap(long, short)]
        kind: Option<StatKind>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "cricbuzz-livestats", about = "Cricbuzz LiveStats dashboard and CLI")]
pub struct LiveStats {
    /// Database file (or set `LIVESTATS_DB_PATH`).
    #[clap(long, global = true)]
    pub db: Option<PathBuf>,

    /// Address the dashboard binds to (or set `LIVESTATS_ADDR`).
    #[clap(long, global = true)]
    pub addr: Option<SocketAddr>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the browser dashboard.
    Serve,

    /// Get data from the Cricbuzz provider
    Get {
        #[clap(subcommand)]
        cmd: GetCmd,
    },

    /// Run one SQL statement against the local database.
    Query {
        /// SQL text to run.
        sql: Option<String>,

        /// Run a canned query by number instead (see `presets`).
        #[clap(long, short)]
        preset: Option<usize>,

        /// Output results as JSON instead of a text table.
        #[clap(long)]
        json: bool,
    },

    /// List the canned analytics queries.
    Presets {
        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_live_matches_flags() {
        let cli = LiveStats::parse_from([
            "cricbuzz-livestats",
            "get",
            "live-matches",
            "--series",
            "asia",
            "--clear-db",
        ]);
        match cli.command {
            Commands::Get {
                cmd:
                    GetCmd::LiveMatches {
                        series,
                        json,
                        save,
                        clear_db,
                    },
            } => {
                assert_eq!(series.as_deref(), Some("asia"));
                assert!(!json);
                assert!(!save);
                assert!(clear_db);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_db_after_subcommand() {
        let cli = LiveStats::parse_from([
            "cricbuzz-livestats",
            "query",
            "--preset",
            "3",
            "--db",
            "/tmp/cricket.db",
        ]);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/cricket.db")));
        match cli.command {
            Commands::Query { sql, preset, .. } => {
                assert_eq!(sql, None);
                assert_eq!(preset, Some(3));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_player_stats_kind() {
        let cli = LiveStats::parse_from([
            "cricbuzz-livestats",
            "get",
            "player-stats",
            "1413",
            "--kind",
            "bowling",
        ]);
        match cli.command {
            Commands::Get {
                cmd: GetCmd::PlayerStats { player_id, kind, .. },
            } => {
                assert_eq!(player_id, PlayerId::new(1413));
                assert_eq!(kind, Some(StatKind::Bowling));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_match_id_rejected() {
        let result = LiveStats::try_parse_from(["cricbuzz-livestats", "get", "scorecard", "abc"]);
        assert!(result.is_err());
    }
}
