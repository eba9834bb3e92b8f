//! Mapping provider payloads onto storage rows, plus display helpers.

use chrono::{TimeZone, Utc};

use super::types::{InningsScore, MatchRecord, PlayerProfile, Scorecard};
use crate::{
    storage::{BattingStat, BowlingStat, Match, Player},
    MatchId,
};

/// Format used for match start/end times on every page.
pub const TIME_FORMAT: &str = "%d %b %Y, %I:%M %p";

/// Render an epoch-milliseconds timestamp, or `N/A` when absent or out of range.
pub fn format_time(epoch_ms: Option<i64>) -> String {
    epoch_ms
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .map(|dt| dt.format(TIME_FORMAT).to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// `102/3 (12.4 ov)`, or `-` when the side has not batted.
pub fn format_score(score: Option<InningsScore>) -> String {
    match score {
        Some(s) => format!("{}/{} ({} ov)", s.runs, s.wickets, s.overs),
        None => "-".to_string(),
    }
}

/// Headshot for a search result's `faceImageId`.
pub fn face_image_url(face_image_id: &str) -> String {
    format!("http://i.cricketcb.com/stats/img/faceImages/{}.jpg", face_image_id.trim())
}

impl From<&MatchRecord> for Match {
    fn from(record: &MatchRecord) -> Self {
        Match {
            series_name: Some(record.series_name.clone()),
            match_desc: record.match_desc.clone(),
            match_format: record.match_format.clone(),
            venue: record.venue.clone(),
            city: record.city.clone(),
            status: record.status.clone(),
            state: record.state.clone(),
            start_time: record.start_time,
            end_time: record.end_time,
            ..Match::new(record.match_id, record.team1.clone(), record.team2.clone())
        }
    }
}

/// Profile fields that map onto a stored player. `None` when the profile has no id or name.
pub fn profile_to_player(profile: &PlayerProfile) -> Option<Player> {
    let id = profile.id?;
    let name = profile.name.clone().filter(|n| !n.trim().is_empty())?;
    Some(Player {
        role: profile.role.clone(),
        team: profile.intl_team.clone(),
        batting_style: profile.batting_style.clone(),
        bowling_style: profile.bowling_style.clone(),
        ..Player::new(id, name)
    })
}

/// Rows derived from one scorecard, ready to be written for a match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScorecardRows {
    pub players: Vec<Player>,
    pub batting: Vec<BattingStat>,
    pub bowling: Vec<BowlingStat>,
}

/// Split a scorecard into players and per-innings stat rows.
///
/// Rows without a player id are skipped. A bowler's team is taken to be the
/// other batting side when the card has exactly two teams.
pub fn scorecard_rows(match_id: MatchId, card: &Scorecard) -> ScorecardRows {
    let mut teams: Vec<&str> = Vec::new();
    for innings in &card.scorecard {
        let team = innings.bat_team_name.as_str();
        if !team.is_empty() && !teams.contains(&team) {
            teams.push(team);
        }
    }
    let opponent = |batting_team: &str| -> Option<String> {
        if teams.len() != 2 {
            return None;
        }
        teams
            .iter()
            .find(|t| **t != batting_team)
            .map(|t| t.to_string())
    };

    let mut rows = ScorecardRows::default();
    let mut seen = Vec::new();

    for (idx, innings) in card.scorecard.iter().enumerate() {
        let innings_no = innings
            .innings_id
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(idx as u32 + 1);
        let batting_team = Some(innings.bat_team_name.clone()).filter(|t| !t.is_empty());

        for bat in &innings.batsman {
            let Some(player_id) = bat.id else { continue };
            if !seen.contains(&player_id) {
                seen.push(player_id);
                rows.players.push(Player {
                    team: batting_team.clone(),
                    ..Player::new(player_id, bat.name.clone())
                });
            }
            rows.batting.push(BattingStat {
                stat_id: None,
                player_id,
                match_id,
                innings: innings_no,
                runs: bat.runs,
                balls: bat.balls,
                fours: bat.fours,
                sixes: bat.sixes,
                strike_rate: bat.strike_rate,
                dismissal: Some(bat.dismissal.clone()).filter(|d| !d.is_empty()),
            });
        }

        for bowl in &innings.bowler {
            let Some(player_id) = bowl.id else { continue };
            if !seen.contains(&player_id) {
                seen.push(player_id);
                rows.players.push(Player {
                    team: opponent(&innings.bat_team_name),
                    ..Player::new(player_id, bowl.name.clone())
                });
            }
            rows.bowling.push(BowlingStat {
                stat_id: None,
                player_id,
                match_id,
                innings: innings_no,
                overs: bowl.overs,
                maidens: bowl.maidens,
                runs_conceded: bowl.runs,
                wickets: bowl.wickets,
                economy: bowl.economy,
            });
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::types::{BatsmanRow, BowlerRow, InningsCard};
    use crate::PlayerId;

    fn card() -> Scorecard {
        Scorecard {
            scorecard: vec![
                InningsCard {
                    innings_id: Some(1),
                    bat_team_name: "Pakistan".to_string(),
                    batsman: vec![
                        BatsmanRow {
                            id: Some(PlayerId::new(8359)),
                            name: "Sahibzada Farhan".to_string(),
                            runs: 57,
                            balls: 38,
                            fours: 5,
                            sixes: 3,
                            strike_rate: 150.0,
                            dismissal: "c Tilak b Varun".to_string(),
                        },
                        BatsmanRow {
                            id: None,
                            name: "Extras".to_string(),
                            ..Default::default()
                        },
                    ],
                    bowler: vec![BowlerRow {
                        id: Some(PlayerId::new(10945)),
                        name: "Kuldeep Yadav".to_string(),
                        overs: 4.0,
                        maidens: 0,
                        runs: 30,
                        wickets: 4,
                        economy: 7.5,
                    }],
                },
                InningsCard {
                    innings_id: Some(2),
                    bat_team_name: "India".to_string(),
                    batsman: vec![BatsmanRow {
                        id: Some(PlayerId::new(10945)),
                        name: "Kuldeep Yadav".to_string(),
                        runs: 0,
                        balls: 0,
                        dismissal: String::new(),
                        ..Default::default()
                    }],
                    bowler: vec![],
                },
            ],
            status: Some("India won by 5 wkts".to_string()),
        }
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(Some(1758981600000)), "27 Sep 2025, 02:00 PM");
        assert_eq!(format_time(None), "N/A");
        assert_eq!(format_time(Some(i64::MAX)), "N/A");
    }

    #[test]
    fn test_format_score() {
        let score = InningsScore {
            runs: 146,
            wickets: 10,
            overs: 19.1,
        };
        assert_eq!(format_score(Some(score)), "146/10 (19.1 ov)");
        assert_eq!(format_score(None), "-");
    }

    #[test]
    fn test_match_from_record() {
        let record = MatchRecord {
            match_id: MatchId::new(1),
            series_name: "Asia Cup 2025".to_string(),
            match_type: "International".to_string(),
            match_desc: Some("Final".to_string()),
            match_format: Some("T20".to_string()),
            team1: "India".to_string(),
            team1_short: Some("IND".to_string()),
            team2: "Pakistan".to_string(),
            team2_short: Some("PAK".to_string()),
            venue: Some("Dubai International Cricket Stadium".to_string()),
            city: Some("Dubai".to_string()),
            status: None,
            state: Some("Live".to_string()),
            start_time: Some(1),
            end_time: None,
            team1_score: None,
            team2_score: None,
        };

        let m = Match::from(&record);
        assert_eq!(m.series_name.as_deref(), Some("Asia Cup 2025"));
        assert_eq!(m.team2, "Pakistan");
        assert_eq!(m.state.as_deref(), Some("Live"));
        assert_eq!(m.start_time, Some(1));
    }

    #[test]
    fn test_scorecard_rows() {
        let rows = scorecard_rows(MatchId::new(130179), &card());

        assert_eq!(rows.batting.len(), 2);
        assert_eq!(rows.bowling.len(), 1);
        assert_eq!(rows.players.len(), 2);

        // Kuldeep first appears bowling at Pakistan, so he is placed with India
        let kuldeep = rows
            .players
            .iter()
            .find(|p| p.player_id == PlayerId::new(10945))
            .unwrap();
        assert_eq!(kuldeep.team.as_deref(), Some("India"));

        assert_eq!(rows.batting[0].dismissal.as_deref(), Some("c Tilak b Varun"));
        assert_eq!(rows.batting[1].innings, 2);
        assert_eq!(rows.batting[1].dismissal, None);
        assert_eq!(rows.bowling[0].runs_conceded, 30);
    }

    #[test]
    fn test_profile_to_player() {
        let profile = PlayerProfile {
            id: Some(PlayerId::new(1413)),
            name: Some("Virat Kohli".to_string()),
            role: Some("Batsman".to_string()),
            intl_team: Some("India".to_string()),
            ..Default::default()
        };
        let player = profile_to_player(&profile).unwrap();
        assert_eq!(player.team.as_deref(), Some("India"));

        assert!(profile_to_player(&PlayerProfile::default()).is_none());
    }
}
