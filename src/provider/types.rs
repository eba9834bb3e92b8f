//! Deserialization targets for the Cricbuzz provider payloads.
//!
//! The provider is loose with numeric fields: ids arrive as strings on the
//! stats endpoints, strike rates and overs sometimes come quoted. Numeric
//! fields therefore go through the `de_flex_*` helpers and default to zero
//! (or `None`) when absent.

use crate::cli::types::{MatchId, PlayerId};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[cfg(test)]
mod tests;

fn value_as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn value_as_i64(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Render a JSON scalar the way a table cell shows it.
pub fn value_to_display(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn de_flex_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(value_as_f64).unwrap_or(0.0))
}

fn de_flex_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(value_as_i64).unwrap_or(0))
}

fn de_flex_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(value_as_i64))
}

fn de_flex_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .map(value_to_display)
        .filter(|s| !s.is_empty()))
}

fn de_player_id<'de, D>(deserializer: D) -> Result<PlayerId, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    value_as_i64(&raw)
        .map(PlayerId::new)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid player id: {}", raw)))
}

fn de_opt_player_id<'de, D>(deserializer: D) -> Result<Option<PlayerId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(value_as_i64).map(PlayerId::new))
}

// ---------------------------------------------------------------------------
// Live matches: /matches/v1/live
// ---------------------------------------------------------------------------

/// Top-level envelope for the live matches feed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiveMatchesResponse {
    #[serde(rename = "typeMatches", default)]
    pub type_matches: Vec<TypeMatches>,
}

/// Matches grouped by type (International, League, Domestic, Women)
#[derive(Debug, Clone, Deserialize)]
pub struct TypeMatches {
    #[serde(rename = "matchType", default)]
    pub match_type: Option<String>,
    #[serde(rename = "seriesMatches", default)]
    pub series_matches: Vec<SeriesMatches>,
}

/// One slot in a type group. Ad slots carry no `seriesAdWrapper`.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesMatches {
    #[serde(rename = "seriesAdWrapper", default)]
    pub series_ad_wrapper: Option<SeriesAdWrapper>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeriesAdWrapper {
    #[serde(rename = "seriesId", default, deserialize_with = "de_flex_opt_i64")]
    pub series_id: Option<i64>,
    #[serde(rename = "seriesName", default)]
    pub series_name: Option<String>,
    #[serde(default)]
    pub matches: Option<Vec<LiveMatch>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LiveMatch {
    #[serde(rename = "matchInfo")]
    pub match_info: MatchInfo,
    #[serde(rename = "matchScore", default)]
    pub match_score: Option<MatchScore>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchInfo {
    #[serde(rename = "matchId")]
    pub match_id: MatchId,
    #[serde(rename = "seriesName", default)]
    pub series_name: Option<String>,
    #[serde(rename = "matchDesc", default)]
    pub match_desc: Option<String>,
    #[serde(rename = "matchFormat", default)]
    pub match_format: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(rename = "stateTitle", default)]
    pub state_title: Option<String>,
    #[serde(rename = "startDate", default, deserialize_with = "de_flex_opt_i64")]
    pub start_date: Option<i64>,
    #[serde(rename = "endDate", default, deserialize_with = "de_flex_opt_i64")]
    pub end_date: Option<i64>,
    #[serde(default)]
    pub team1: TeamInfo,
    #[serde(default)]
    pub team2: TeamInfo,
    #[serde(rename = "venueInfo", default)]
    pub venue_info: Option<VenueInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamInfo {
    #[serde(rename = "teamId", default, deserialize_with = "de_flex_opt_i64")]
    pub team_id: Option<i64>,
    #[serde(rename = "teamName", default)]
    pub team_name: Option<String>,
    #[serde(rename = "teamSName", default)]
    pub team_short_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenueInfo {
    #[serde(default)]
    pub ground: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchScore {
    #[serde(rename = "team1Score", default)]
    pub team1_score: Option<TeamScore>,
    #[serde(rename = "team2Score", default)]
    pub team2_score: Option<TeamScore>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamScore {
    #[serde(default)]
    pub inngs1: Option<InningsScore>,
    #[serde(default)]
    pub inngs2: Option<InningsScore>,
}

/// Runs/wickets/overs summary for one innings
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct InningsScore {
    #[serde(default, deserialize_with = "de_flex_i64")]
    pub runs: i64,
    #[serde(default, deserialize_with = "de_flex_i64")]
    pub wickets: i64,
    #[serde(default, deserialize_with = "de_flex_f64")]
    pub overs: f64,
}

/// One live match flattened out of the type/series nesting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub match_id: MatchId,
    pub series_name: String,
    pub match_type: String,
    pub match_desc: Option<String>,
    pub match_format: Option<String>,
    pub team1: String,
    pub team1_short: Option<String>,
    pub team2: String,
    pub team2_short: Option<String>,
    pub venue: Option<String>,
    pub city: Option<String>,
    pub status: Option<String>,
    pub state: Option<String>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub team1_score: Option<InningsScore>,
    pub team2_score: Option<InningsScore>,
}

impl MatchRecord {
    /// Key used to group matches on the live page, e.g. `Asia Cup 2025 (International)`.
    pub fn series_label(&self) -> String {
        format!("{} ({})", self.series_name, self.match_type)
    }
}

impl LiveMatchesResponse {
    /// Flatten `typeMatches[].seriesMatches[].seriesAdWrapper.matches[]`.
    pub fn into_records(self) -> Vec<MatchRecord> {
        let mut records = Vec::new();
        for group in self.type_matches {
            let match_type = group.match_type.unwrap_or_else(|| "Unknown".to_string());
            for slot in group.series_matches {
                let Some(wrapper) = slot.series_ad_wrapper else {
                    continue;
                };
                let Some(matches) = wrapper.matches else {
                    continue;
                };
                let series_name = wrapper
                    .series_name
                    .unwrap_or_else(|| "Unknown Series".to_string());

                for m in matches {
                    let info = m.match_info;
                    let score = m.match_score.unwrap_or_default();
                    let venue = info.venue_info.unwrap_or_default();

                    records.push(MatchRecord {
                        match_id: info.match_id,
                        series_name: info.series_name.unwrap_or_else(|| series_name.clone()),
                        match_type: match_type.clone(),
                        match_desc: info.match_desc,
                        match_format: info.match_format,
                        team1: info.team1.team_name.unwrap_or_else(|| "Team 1".to_string()),
                        team1_short: info.team1.team_short_name,
                        team2: info.team2.team_name.unwrap_or_else(|| "Team 2".to_string()),
                        team2_short: info.team2.team_short_name,
                        venue: venue.ground,
                        city: venue.city,
                        status: info.status,
                        state: info.state_title.or(info.state),
                        start_time: info.start_date,
                        end_time: info.end_date,
                        team1_score: score.team1_score.and_then(|s| s.inngs1),
                        team2_score: score.team2_score.and_then(|s| s.inngs1),
                    });
                }
            }
        }
        records
    }
}

// ---------------------------------------------------------------------------
// Scorecard: /mcenter/v1/{matchId}/scard
// ---------------------------------------------------------------------------

/// Full scorecard of one match
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Scorecard {
    #[serde(default)]
    pub scorecard: Vec<InningsCard>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InningsCard {
    #[serde(rename = "inningsid", default, deserialize_with = "de_flex_opt_i64")]
    pub innings_id: Option<i64>,
    #[serde(rename = "batteamname", default)]
    pub bat_team_name: String,
    #[serde(default)]
    pub batsman: Vec<BatsmanRow>,
    #[serde(default)]
    pub bowler: Vec<BowlerRow>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BatsmanRow {
    #[serde(default, deserialize_with = "de_opt_player_id")]
    pub id: Option<PlayerId>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "de_flex_i64")]
    pub runs: i64,
    #[serde(default, deserialize_with = "de_flex_i64")]
    pub balls: i64,
    #[serde(default, deserialize_with = "de_flex_i64")]
    pub fours: i64,
    #[serde(default, deserialize_with = "de_flex_i64")]
    pub sixes: i64,
    #[serde(rename = "strkrate", default, deserialize_with = "de_flex_f64")]
    pub strike_rate: f64,
    #[serde(rename = "outdec", default)]
    pub dismissal: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BowlerRow {
    #[serde(default, deserialize_with = "de_opt_player_id")]
    pub id: Option<PlayerId>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "de_flex_f64")]
    pub overs: f64,
    #[serde(default, deserialize_with = "de_flex_i64")]
    pub maidens: i64,
    #[serde(default, deserialize_with = "de_flex_i64")]
    pub runs: i64,
    #[serde(default, deserialize_with = "de_flex_i64")]
    pub wickets: i64,
    #[serde(default, deserialize_with = "de_flex_f64")]
    pub economy: f64,
}

// ---------------------------------------------------------------------------
// Player endpoints: /stats/v1/player/...
// ---------------------------------------------------------------------------

/// Envelope for `/stats/v1/player/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerSearchResponse {
    #[serde(default)]
    pub player: Vec<PlayerSummary>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerSummary {
    #[serde(deserialize_with = "de_player_id")]
    pub id: PlayerId,
    pub name: String,
    #[serde(rename = "teamName", default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(rename = "faceImageId", default, deserialize_with = "de_flex_opt_string")]
    pub face_image_id: Option<String>,
}

/// Detailed profile from `/stats/v1/player/{id}`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlayerProfile {
    #[serde(default, deserialize_with = "de_opt_player_id")]
    pub id: Option<PlayerId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(rename = "bat", default)]
    pub batting_style: Option<String>,
    #[serde(rename = "bowl", default)]
    pub bowling_style: Option<String>,
    #[serde(default)]
    pub teams: Option<String>,
    #[serde(rename = "intlTeam", default)]
    pub intl_team: Option<String>,
    #[serde(rename = "birthPlace", default)]
    pub birth_place: Option<String>,
    #[serde(default)]
    pub rankings: Option<Rankings>,
    #[serde(rename = "webURL", default)]
    pub web_url: Option<String>,
}

/// ICC rankings keyed by category, values as the provider sends them
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Rankings {
    #[serde(default)]
    pub bat: BTreeMap<String, Value>,
    #[serde(default)]
    pub bowl: BTreeMap<String, Value>,
    #[serde(default)]
    pub all: BTreeMap<String, Value>,
}

impl Rankings {
    pub fn is_empty(&self) -> bool {
        self.bat.is_empty() && self.bowl.is_empty() && self.all.is_empty()
    }
}

/// Raw shape shared by the batting, bowling and career endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsTableResponse {
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub values: Vec<StatsRow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsRow {
    #[serde(default)]
    pub values: Vec<Value>,
}

/// Header row plus string cells, ready for display
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl StatsTable {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.rows.is_empty()
    }
}

pub const CAREER_HEADERS: [&str; 3] = ["Format", "Debut", "Last Played"];

impl StatsTableResponse {
    /// Batting/bowling tables: headers like `[ROWHEADER, Test, ODI, T20, IPL]`.
    pub fn into_table(self) -> StatsTable {
        let rows = self
            .values
            .into_iter()
            .map(|row| row.values.iter().map(value_to_display).collect())
            .collect();
        StatsTable {
            headers: self.headers,
            rows,
        }
    }

    /// Career rows carry `[format, debut, last played, debut id, last id]`;
    /// only the first three columns are shown.
    pub fn into_career_table(self) -> StatsTable {
        let rows = self
            .values
            .into_iter()
            .filter(|row| !row.values.is_empty())
            .map(|row| {
                row.values
                    .iter()
                    .take(CAREER_HEADERS.len())
                    .map(value_to_display)
                    .collect()
            })
            .collect();
        StatsTable {
            headers: CAREER_HEADERS.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }
}
