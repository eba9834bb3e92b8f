//! Career statistics categories served by the provider.

use crate::error::LiveStatsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which career table to request from `/stats/v1/player/{id}/{kind}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Batting,
    Bowling,
}

impl StatKind {
    /// Path segment used by the provider.
    pub fn as_path(&self) -> &'static str {
        match self {
            StatKind::Batting => "batting",
            StatKind::Bowling => "bowling",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_path())
    }
}

impl FromStr for StatKind {
    type Err = LiveStatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "batting" | "bat" => Ok(StatKind::Batting),
            "bowling" | "bowl" => Ok(StatKind::Bowling),
            _ => Err(LiveStatsError::InvalidStatKind {
                kind: s.to_string(),
            }),
        }
    }
}
