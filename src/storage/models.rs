//! Data models for the storage layer

use crate::cli::types::{MatchId, PlayerId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Match row. Times are epoch milliseconds as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub match_id: MatchId,
    pub series_name: Option<String>,
    pub match_desc: Option<String>,
    pub match_format: Option<String>,
    pub team1: String,
    pub team2: String,
    pub venue: Option<String>,
    pub city: Option<String>,
    pub status: Option<String>,
    pub state: Option<String>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Match {
    /// A match with only the required fields set.
    pub fn new(match_id: MatchId, team1: impl Into<String>, team2: impl Into<String>) -> Self {
        Self {
            match_id,
            series_name: None,
            match_desc: None,
            match_format: None,
            team1: team1.into(),
            team2: team2.into(),
            venue: None,
            city: None,
            status: None,
            state: None,
            start_time: None,
            end_time: None,
            created_at: 0,
            updated_at: 0,
        }
    }
}

/// Player information stored in the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub name: String,
    pub role: Option<String>,
    pub team: Option<String>,
    pub batting_style: Option<String>,
    pub bowling_style: Option<String>,
}

impl Player {
    pub fn new(player_id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            player_id,
            name: name.into(),
            role: None,
            team: None,
            batting_style: None,
            bowling_style: None,
        }
    }
}

/// A team's squad for a series; members live in `squad_members`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Squad {
    pub squad_id: i64,
    pub team: String,
    pub series_name: String,
    pub member_count: u32,
}

/// One batting innings of a player in a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattingStat {
    /// Assigned by the database on insert
    pub stat_id: Option<i64>,
    pub player_id: PlayerId,
    pub match_id: MatchId,
    pub innings: u32,
    pub runs: i64,
    pub balls: i64,
    pub fours: i64,
    pub sixes: i64,
    pub strike_rate: f64,
    pub dismissal: Option<String>,
}

/// One bowling spell of a player in a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowlingStat {
    /// Assigned by the database on insert
    pub stat_id: Option<i64>,
    pub player_id: PlayerId,
    pub match_id: MatchId,
    pub innings: u32,
    pub overs: f64,
    pub maidens: i64,
    pub runs_conceded: i64,
    pub wickets: i64,
    pub economy: f64,
}

/// A single cell returned by the query playground
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "NULL"),
            CellValue::Integer(v) => write!(f, "{}", v),
            CellValue::Real(v) => write!(f, "{}", v),
            CellValue::Text(v) => write!(f, "{}", v),
            CellValue::Blob(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}

impl From<rusqlite::types::ValueRef<'_>> for CellValue {
    fn from(value: rusqlite::types::ValueRef<'_>) -> Self {
        use rusqlite::types::ValueRef;
        match value {
            ValueRef::Null => CellValue::Null,
            ValueRef::Integer(i) => CellValue::Integer(i),
            ValueRef::Real(r) => CellValue::Real(r),
            ValueRef::Text(t) => CellValue::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => CellValue::Blob(b.to_vec()),
        }
    }
}

/// Column names plus rows of a read query
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// What running an arbitrary statement produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum QueryOutcome {
    Rows(QueryResult),
    Affected { rows: usize },
}

/// One row of `PRAGMA table_info`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnInfo {
    pub cid: i64,
    pub name: String,
    pub data_type: String,
    pub not_null: bool,
    pub default_value: Option<String>,
    pub primary_key: bool,
}

/// Result of one of the generic table tools: affected rows and the SQL text run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableChange {
    pub affected: usize,
    pub sql: String,
}
