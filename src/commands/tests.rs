//! Unit tests for command helpers and store mirroring

use super::common::*;
use super::live_matches::{filter_series, group_by_series};
use super::scorecard::{batting_table, bowling_table};
use crate::provider::types::{BatsmanRow, BowlerRow, InningsCard};
use crate::provider::{CricbuzzClient, MatchRecord, Scorecard};
use crate::storage::{CricketDatabase, Match};
use crate::{MatchId, PlayerId};
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

fn record(id: i64, series: &str, match_type: &str) -> MatchRecord {
    MatchRecord {
        match_id: MatchId::new(id),
        series_name: series.to_string(),
        match_type: match_type.to_string(),
        match_desc: Some(format!("{}th Match", id)),
        match_format: Some("T20".to_string()),
        team1: "India".to_string(),
        team1_short: Some("IND".to_string()),
        team2: "Pakistan".to_string(),
        team2_short: Some("PAK".to_string()),
        venue: Some("Dubai International Cricket Stadium".to_string()),
        city: Some("Dubai".to_string()),
        status: Some("In Progress".to_string()),
        state: Some("Live".to_string()),
        start_time: Some(1758981600000 + id),
        end_time: None,
        team1_score: None,
        team2_score: None,
    }
}

fn card() -> Scorecard {
    Scorecard {
        scorecard: vec![
            InningsCard {
                innings_id: Some(1),
                bat_team_name: "Pakistan".to_string(),
                batsman: vec![BatsmanRow {
                    id: Some(PlayerId::new(8359)),
                    name: "Sahibzada Farhan".to_string(),
                    runs: 57,
                    balls: 38,
                    fours: 5,
                    sixes: 3,
                    strike_rate: 150.0,
                    dismissal: "c Tilak b Varun".to_string(),
                }],
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
                batsman: vec![],
                bowler: vec![],
            },
        ],
        status: Some("India won by 5 wkts".to_string()),
    }
}

fn client_for(server: &MockServer, timeout: Duration) -> CricbuzzClient {
    CricbuzzClient::new(server.uri(), "test-key", "cricbuzz-cricket.p.rapidapi.com", timeout)
        .unwrap()
}

#[test]
fn test_group_by_series() {
    let records = vec![
        record(1, "Asia Cup 2025", "International"),
        record(2, "CPL 2025", "League"),
        record(3, "Asia Cup 2025", "International"),
    ];

    let groups = group_by_series(&records);
    let labels: Vec<&String> = groups.keys().collect();
    assert_eq!(labels, vec!["Asia Cup 2025 (International)", "CPL 2025 (League)"]);
    assert_eq!(groups["Asia Cup 2025 (International)"].len(), 2);
}

#[test]
fn test_filter_series() {
    let records = vec![
        record(1, "Asia Cup 2025", "International"),
        record(2, "CPL 2025", "League"),
    ];

    let filtered = filter_series(records.clone(), Some("asia"));
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].match_id, MatchId::new(1));

    assert_eq!(filter_series(records.clone(), Some("  ")).len(), 2);
    assert_eq!(filter_series(records, None).len(), 2);
}

#[test]
fn test_mirror_matches_upserts() {
    let mut db = CricketDatabase::new_in_memory().unwrap();
    let records = vec![record(1, "Asia Cup 2025", "International")];

    assert_eq!(mirror_matches(&mut db, &records).unwrap(), 1);
    let mut updated = records.clone();
    updated[0].status = Some("India won by 5 wkts".to_string());
    mirror_matches(&mut db, &updated).unwrap();

    let stored = db.list_matches().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status.as_deref(), Some("India won by 5 wkts"));
}

#[test]
fn test_mirror_scorecard_creates_missing_match() {
    let mut db = CricketDatabase::new_in_memory().unwrap();

    let written = mirror_scorecard(&mut db, MatchId::new(130179), &card()).unwrap();
    assert_eq!(written, 2);

    let m = db.get_match(MatchId::new(130179)).unwrap().unwrap();
    assert_eq!(m.team1, "Pakistan");
    assert_eq!(m.team2, "India");
    assert_eq!(m.status.as_deref(), Some("India won by 5 wkts"));

    let kuldeep = db.get_player(PlayerId::new(10945)).unwrap().unwrap();
    assert_eq!(kuldeep.team.as_deref(), Some("India"));
}

#[test]
fn test_mirror_empty_scorecard_writes_nothing() {
    let mut db = CricketDatabase::new_in_memory().unwrap();

    let written = mirror_scorecard(&mut db, MatchId::new(7), &Scorecard::default()).unwrap();
    assert_eq!(written, 0);
    assert!(db.get_match(MatchId::new(7)).unwrap().is_none());
}

#[test]
fn test_mirror_scorecard_twice_replaces_rows() {
    let mut db = CricketDatabase::new_in_memory().unwrap();
    db.insert_match(&Match::new(MatchId::new(130179), "India", "Pakistan"))
        .unwrap();

    mirror_scorecard(&mut db, MatchId::new(130179), &card()).unwrap();
    mirror_scorecard(&mut db, MatchId::new(130179), &card()).unwrap();

    assert_eq!(db.batting_stats_for_match(MatchId::new(130179)).unwrap().len(), 1);
    assert_eq!(db.bowling_stats_for_match(MatchId::new(130179)).unwrap().len(), 1);
    // The existing match row is not replaced by the placeholder
    assert_eq!(db.get_match(MatchId::new(130179)).unwrap().unwrap().team1, "India");
}

#[test]
fn test_scorecard_tables() {
    let card = card();
    let (headers, rows) = batting_table(&card, 0);
    assert_eq!(headers[0], "Batter");
    assert_eq!(rows[0][2], "57");
    assert_eq!(rows[0][6], "150.00");

    let (_, rows) = bowling_table(&card, 0);
    assert_eq!(rows[0], vec!["Kuldeep Yadav", "4", "0", "30", "4", "7.50"]);

    let (_, rows) = batting_table(&card, 5);
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_refresh_live_matches_mirrors() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/matches/v1/live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "typeMatches": [{
                "matchType": "International",
                "seriesMatches": [{
                    "seriesAdWrapper": {
                        "seriesName": "Asia Cup 2025",
                        "matches": [{
                            "matchInfo": {
                                "matchId": 130179,
                                "team1": {"teamName": "India"},
                                "team2": {"teamName": "Pakistan"}
                            }
                        }]
                    }
                }]
            }]
        })))
        .mount(&mock_server)
        .await;

    let mut db = CricketDatabase::new_in_memory().unwrap();
    let client = client_for(&mock_server, Duration::from_secs(5));

    let records = refresh_live_matches(&client, &mut db).await.unwrap();
    assert_eq!(records.len(), 1);
    assert!(db.get_match(MatchId::new(130179)).unwrap().is_some());
}

#[tokio::test]
async fn test_fetch_timeout_leaves_store_unchanged() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/matches/v1/live"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"typeMatches": []}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let mut db = CricketDatabase::new_in_memory().unwrap();
    mirror_matches(&mut db, &[record(1, "Asia Cup 2025", "International")]).unwrap();
    let before = db.list_matches().unwrap();

    let client = client_for(&mock_server, Duration::from_millis(50));
    let result = refresh_live_matches(&client, &mut db).await;

    assert!(result.unwrap_err().is_provider_error());
    assert_eq!(db.list_matches().unwrap(), before);
}
