//! Cricbuzz data provider: HTTP client, payload types and conversions.

pub mod convert;
pub mod http;
pub mod types;

pub use convert::{
    face_image_url, format_score, format_time, profile_to_player, scorecard_rows, ScorecardRows,
};
pub use http::CricbuzzClient;
pub use types::{MatchRecord, PlayerProfile, PlayerSummary, Scorecard, StatsTable};
