//! Form payloads posted by the CRUD and tool pages, and their conversion
//! into storage rows. Blank text fields become `None`.

use serde::Deserialize;

use crate::{
    error::LiveStatsError,
    storage::{BattingStat, BowlingStat, Match, Player},
    MatchId, PlayerId, Result,
};

fn blank_to_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    blank_to_none(value).ok_or_else(|| LiveStatsError::query(format!("{} is required.", field)))
}

fn parse_num<T: std::str::FromStr>(field: &str, value: &str, default: Option<T>) -> Result<T> {
    match blank_to_none(value) {
        None => default.ok_or_else(|| LiveStatsError::query(format!("{} is required.", field))),
        Some(v) => v
            .parse::<T>()
            .map_err(|_| LiveStatsError::query(format!("Invalid number for {}: {}", field, v))),
    }
}

fn parse_opt_num<T: std::str::FromStr>(field: &str, value: &str) -> Result<Option<T>> {
    match blank_to_none(value) {
        None => Ok(None),
        Some(v) => v
            .parse::<T>()
            .map(Some)
            .map_err(|_| LiveStatsError::query(format!("Invalid number for {}: {}", field, v))),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MatchForm {
    pub match_id: String,
    pub series_name: String,
    pub match_desc: String,
    pub match_format: String,
    pub team1: String,
    pub team2: String,
    pub venue: String,
    pub city: String,
    pub status: String,
    pub state: String,
    pub start_time: String,
    pub end_time: String,
}

impl MatchForm {
    /// Build a match; `id` comes from the path on updates and from the form on create.
    pub fn into_match(self, id: Option<MatchId>) -> Result<Match> {
        let match_id = match id {
            Some(id) => id,
            None => MatchId::new(parse_num("Match ID", &self.match_id, None)?),
        };
        Ok(Match {
            series_name: blank_to_none(&self.series_name),
            match_desc: blank_to_none(&self.match_desc),
            match_format: blank_to_none(&self.match_format),
            venue: blank_to_none(&self.venue),
            city: blank_to_none(&self.city),
            status: blank_to_none(&self.status),
            state: blank_to_none(&self.state),
            start_time: parse_opt_num("Start", &self.start_time)?,
            end_time: parse_opt_num("End", &self.end_time)?,
            ..Match::new(
                match_id,
                required("Team 1", &self.team1)?,
                required("Team 2", &self.team2)?,
            )
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlayerForm {
    pub player_id: String,
    pub name: String,
    pub role: String,
    pub team: String,
    pub batting_style: String,
    pub bowling_style: String,
}

impl PlayerForm {
    pub fn into_player(self, id: Option<PlayerId>) -> Result<Player> {
        let player_id = match id {
            Some(id) => id,
            None => PlayerId::new(parse_num("Player ID", &self.player_id, None)?),
        };
        Ok(Player {
            role: blank_to_none(&self.role),
            team: blank_to_none(&self.team),
            batting_style: blank_to_none(&self.batting_style),
            bowling_style: blank_to_none(&self.bowling_style),
            ..Player::new(player_id, required("Name", &self.name)?)
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SquadForm {
    pub team: String,
    pub series_name: String,
}

impl SquadForm {
    pub fn parts(&self) -> Result<(String, String)> {
        Ok((
            required("Team", &self.team)?,
            required("Series", &self.series_name)?,
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberAction {
    #[default]
    Add,
    Remove,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SquadMemberForm {
    pub player_id: String,
    pub action: MemberAction,
}

impl SquadMemberForm {
    pub fn player_id(&self) -> Result<PlayerId> {
        Ok(PlayerId::new(parse_num("Player ID", &self.player_id, None)?))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BattingForm {
    pub player_id: String,
    pub match_id: String,
    pub innings: String,
    pub runs: String,
    pub balls: String,
    pub fours: String,
    pub sixes: String,
    pub dismissal: String,
}

impl BattingForm {
    /// Strike rate is derived from runs and balls.
    pub fn into_stat(self) -> Result<BattingStat> {
        let runs: i64 = parse_num("Runs", &self.runs, Some(0))?;
        let balls: i64 = parse_num("Balls", &self.balls, Some(0))?;
        let strike_rate = if balls > 0 {
            (runs as f64 * 100.0 / balls as f64 * 100.0).round() / 100.0
        } else {
            0.0
        };
        Ok(BattingStat {
            stat_id: None,
            player_id: PlayerId::new(parse_num("Player ID", &self.player_id, None)?),
            match_id: MatchId::new(parse_num("Match ID", &self.match_id, None)?),
            innings: parse_num("Innings", &self.innings, Some(1))?,
            runs,
            balls,
            fours: parse_num("4s", &self.fours, Some(0))?,
            sixes: parse_num("6s", &self.sixes, Some(0))?,
            strike_rate,
            dismissal: blank_to_none(&self.dismissal),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BowlingForm {
    pub player_id: String,
    pub match_id: String,
    pub innings: String,
    pub overs: String,
    pub maidens: String,
    pub runs_conceded: String,
    pub wickets: String,
}

/// Longest spell the form accepts.
pub const MAX_OVERS: f64 = 1000.0;

/// Cricket overs notation (`3.4` is 3 overs and 4 balls) to balls bowled.
pub fn overs_to_balls(overs: f64) -> Result<i64> {
    let invalid = || LiveStatsError::query(format!("Invalid overs: {}", overs));
    if !overs.is_finite() || !(0.0..=MAX_OVERS).contains(&overs) {
        return Err(invalid());
    }
    let whole = overs.trunc() as i64;
    let part = ((overs - overs.trunc()) * 10.0).round() as i64;
    if part > 5 {
        return Err(invalid());
    }
    whole
        .checked_mul(6)
        .and_then(|balls| balls.checked_add(part))
        .ok_or_else(invalid)
}

impl BowlingForm {
    /// Economy is derived from runs conceded and overs bowled.
    pub fn into_stat(self) -> Result<BowlingStat> {
        let overs: f64 = parse_num("Overs", &self.overs, Some(0.0))?;
        let runs_conceded: i64 = parse_num("Runs", &self.runs_conceded, Some(0))?;
        let balls = overs_to_balls(overs)?;
        let economy = if balls > 0 {
            (runs_conceded as f64 * 6.0 / balls as f64 * 100.0).round() / 100.0
        } else {
            0.0
        };
        Ok(BowlingStat {
            stat_id: None,
            player_id: PlayerId::new(parse_num("Player ID", &self.player_id, None)?),
            match_id: MatchId::new(parse_num("Match ID", &self.match_id, None)?),
            innings: parse_num("Innings", &self.innings, Some(1))?,
            overs,
            maidens: parse_num("Maidens", &self.maidens, Some(0))?,
            runs_conceded,
            wickets: parse_num("Wickets", &self.wickets, Some(0))?,
            economy,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SqlForm {
    pub sql: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WhereForm {
    pub where_clause: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateForm {
    pub set_clause: String,
    pub where_clause: String,
}
