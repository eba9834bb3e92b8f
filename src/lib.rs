//! Cricbuzz LiveStats Library
//!
//! Live cricket data from the Cricbuzz API on RapidAPI, mirrored into a local
//! SQLite database and served through a small browser dashboard and a CLI.
//!
//! ## Features
//!
//! - **Live Matches**: Current matches grouped by series, with scores and venue
//! - **Scorecards**: Per-innings batting and bowling tables for one match
//! - **Player Stats**: Player search, profiles and career tables
//! - **Local Store**: Matches, players, squads and stat rows in SQLite
//! - **SQL Playground**: Free-text queries plus canned analytics
//! - **CRUD Tools**: Create, update and delete rows from the browser
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cricbuzz_livestats::{commands::common::refresh_live_matches, provider::CricbuzzClient};
//! use cricbuzz_livestats::{storage::CricketDatabase, AppConfig};
//!
//! # async fn example() -> cricbuzz_livestats::Result<()> {
//! let config = AppConfig::from_env()?;
//! let client = CricbuzzClient::from_config(&config)?;
//! let mut db = CricketDatabase::open(&config.database_path)?;
//!
//! let matches = refresh_live_matches(&client, &mut db).await?;
//! println!("{} live matches", matches.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Set your RapidAPI key before fetching anything:
//! ```bash
//! export RAPIDAPI_KEY=your-key
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod provider;
pub mod storage;
pub mod web;

// Re-export commonly used types
pub use cli::types::{MatchId, PlayerId, StatKind};
pub use core::AppConfig;
pub use error::{LiveStatsError, Result};
