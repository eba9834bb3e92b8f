//! Unit tests for provider payload parsing

use super::*;
use serde_json::json;

fn live_matches_payload() -> Value {
    json!({
        "typeMatches": [
            {
                "matchType": "International",
                "seriesMatches": [
                    {
                        "seriesAdWrapper": {
                            "seriesId": 9596,
                            "seriesName": "Asia Cup 2025",
                            "matches": [
                                {
                                    "matchInfo": {
                                        "matchId": 130179,
                                        "seriesId": 9596,
                                        "seriesName": "Asia Cup 2025",
                                        "matchDesc": "Final",
                                        "matchFormat": "T20",
                                        "startDate": "1758981600000",
                                        "endDate": "1758994200000",
                                        "state": "In Progress",
                                        "status": "India need 45 runs",
                                        "stateTitle": "Live",
                                        "team1": {"teamId": 2, "teamName": "India", "teamSName": "IND"},
                                        "team2": {"teamId": 3, "teamName": "Pakistan", "teamSName": "PAK"},
                                        "venueInfo": {"ground": "Dubai International Cricket Stadium", "city": "Dubai"}
                                    },
                                    "matchScore": {
                                        "team1Score": {"inngs1": {"inningsId": 1, "runs": 102, "wickets": 3, "overs": 12.4}},
                                        "team2Score": {"inngs1": {"inningsId": 1, "runs": 146, "wickets": 10, "overs": 19.1}}
                                    }
                                }
                            ]
                        }
                    },
                    {
                        "adDetail": {"name": "native_matches_mweb", "layout": "native_small", "position": 1}
                    }
                ]
            },
            {
                "matchType": "League",
                "seriesMatches": [
                    {
                        "seriesAdWrapper": {
                            "seriesId": 9700,
                            "seriesName": "Caribbean Premier League 2025",
                            "matches": [
                                {
                                    "matchInfo": {
                                        "matchId": 130500,
                                        "matchDesc": "24th Match",
                                        "matchFormat": "T20",
                                        "startDate": 1758900000000i64,
                                        "state": "Preview",
                                        "status": "Match starts at 23:00 GMT",
                                        "team1": {"teamName": "Trinbago Knight Riders", "teamSName": "TKR"},
                                        "team2": {"teamName": "Guyana Amazon Warriors", "teamSName": "GAW"}
                                    }
                                }
                            ]
                        }
                    }
                ]
            }
        ]
    })
}

fn scorecard_payload() -> Value {
    json!({
        "scorecard": [
            {
                "inningsid": 1,
                "batteamname": "Pakistan",
                "batsman": [
                    {"id": 12345, "name": "Fakhar Zaman", "runs": 46, "balls": 35, "fours": 2, "sixes": 3, "strkrate": "131.43", "outdec": "c Tilak b Varun"},
                    {"id": 23456, "name": "Saim Ayub", "runs": "14", "balls": 11, "fours": 1, "sixes": 1, "strkrate": 127.27, "outdec": "c Bumrah b Kuldeep"}
                ],
                "bowler": [
                    {"id": 9311, "name": "Jasprit Bumrah", "overs": "3.1", "maidens": 0, "runs": 25, "wickets": 2, "economy": "7.89"},
                    {"id": 10940, "name": "Kuldeep Yadav", "overs": 4, "maidens": 0, "runs": 30, "wickets": 4, "economy": 7.5}
                ]
            },
            {
                "inningsid": 2,
                "batteamname": "India",
                "batsman": [
                    {"id": 22530, "name": "Tilak Varma", "runs": 69, "balls": 53, "fours": 3, "sixes": 4, "strkrate": "130.19", "outdec": "not out"},
                    {"name": "Sub (unknown)", "runs": 0}
                ],
                "bowler": [
                    {"id": 14694, "name": "Faheem Ashraf", "overs": "4", "maidens": 0, "runs": 29, "wickets": 3, "economy": "7.25"}
                ]
            }
        ],
        "status": "India won by 5 wkts"
    })
}

#[test]
fn test_live_matches_flatten_skips_ad_slots() {
    let response: LiveMatchesResponse = serde_json::from_value(live_matches_payload()).unwrap();
    let records = response.into_records();

    assert_eq!(records.len(), 2);

    let final_match = &records[0];
    assert_eq!(final_match.match_id, MatchId::new(130179));
    assert_eq!(final_match.series_name, "Asia Cup 2025");
    assert_eq!(final_match.match_type, "International");
    assert_eq!(final_match.team1, "India");
    assert_eq!(final_match.team2_short.as_deref(), Some("PAK"));
    assert_eq!(final_match.venue.as_deref(), Some("Dubai International Cricket Stadium"));
    assert_eq!(final_match.state.as_deref(), Some("Live"));
    assert_eq!(final_match.start_time, Some(1758981600000));
    assert_eq!(
        final_match.team1_score,
        Some(InningsScore {
            runs: 102,
            wickets: 3,
            overs: 12.4
        })
    );
    assert_eq!(final_match.series_label(), "Asia Cup 2025 (International)");
}

#[test]
fn test_live_match_without_score_or_venue() {
    let response: LiveMatchesResponse = serde_json::from_value(live_matches_payload()).unwrap();
    let records = response.into_records();

    let preview = &records[1];
    assert_eq!(preview.series_name, "Caribbean Premier League 2025");
    assert_eq!(preview.match_type, "League");
    assert_eq!(preview.start_time, Some(1758900000000));
    assert_eq!(preview.end_time, None);
    assert_eq!(preview.venue, None);
    assert_eq!(preview.team1_score, None);
    assert_eq!(preview.state.as_deref(), Some("Preview"));
}

#[test]
fn test_empty_live_feed() {
    let response: LiveMatchesResponse = serde_json::from_value(json!({})).unwrap();
    assert!(response.into_records().is_empty());
}

#[test]
fn test_scorecard_parses_quoted_numbers() {
    let card: Scorecard = serde_json::from_value(scorecard_payload()).unwrap();

    assert_eq!(card.scorecard.len(), 2);
    let first = &card.scorecard[0];
    assert_eq!(first.bat_team_name, "Pakistan");
    assert_eq!(first.batsman[0].strike_rate, 131.43);
    assert_eq!(first.batsman[1].runs, 14);
    assert_eq!(first.bowler[0].overs, 3.1);
    assert_eq!(first.bowler[1].economy, 7.5);

    let missing_id = &card.scorecard[1].batsman[1];
    assert_eq!(missing_id.id, None);
    assert_eq!(missing_id.balls, 0);
}

#[test]
fn test_player_search_string_ids() {
    let payload = json!({
        "player": [
            {"id": "1413", "name": "Virat Kohli", "teamName": "India", "faceImageId": "332891", "dob": "1988-11-05"},
            {"id": 8733, "name": "KL Rahul", "teamName": "India", "faceImageId": 591583}
        ],
        "category": "Player"
    });

    let response: PlayerSearchResponse = serde_json::from_value(payload).unwrap();
    assert_eq!(response.player.len(), 2);
    assert_eq!(response.player[0].id, PlayerId::new(1413));
    assert_eq!(response.player[0].face_image_id.as_deref(), Some("332891"));
    assert_eq!(response.player[1].face_image_id.as_deref(), Some("591583"));
    assert_eq!(response.player[1].dob, None);
}

#[test]
fn test_player_search_rejects_bad_id() {
    let payload = json!({"player": [{"id": "abc", "name": "Nobody"}]});
    assert!(serde_json::from_value::<PlayerSearchResponse>(payload).is_err());
}

#[test]
fn test_player_profile_with_rankings() {
    let payload = json!({
        "id": "1413",
        "name": "Virat Kohli",
        "bat": "Right Handed Bat",
        "bowl": "Right-arm medium",
        "role": "Batsman",
        "birthPlace": "Delhi",
        "teams": "India, Royal Challengers Bengaluru",
        "intlTeam": "India",
        "rankings": {
            "bat": {"odiRank": "4", "testBestRank": 1},
            "bowl": {},
            "all": {}
        },
        "webURL": "http://www.cricbuzz.com/profiles/1413/virat-kohli"
    });

    let profile: PlayerProfile = serde_json::from_value(payload).unwrap();
    assert_eq!(profile.id, Some(PlayerId::new(1413)));
    assert_eq!(profile.batting_style.as_deref(), Some("Right Handed Bat"));
    let rankings = profile.rankings.unwrap();
    assert!(!rankings.is_empty());
    assert_eq!(value_to_display(&rankings.bat["odiRank"]), "4");
    assert_eq!(value_to_display(&rankings.bat["testBestRank"]), "1");
}

#[test]
fn test_stats_table_conversion() {
    let payload = json!({
        "headers": ["ROWHEADER", "Test", "ODI", "T20"],
        "values": [
            {"values": ["Matches", "123", "302", "125"]},
            {"values": ["Runs", 9230, 14181, 4188]}
        ],
        "appIndex": {"seoTitle": "Virat Kohli batting stats"}
    });

    let response: StatsTableResponse = serde_json::from_value(payload).unwrap();
    let table = response.into_table();
    assert_eq!(table.headers.len(), 4);
    assert_eq!(table.rows[0], vec!["Matches", "123", "302", "125"]);
    assert_eq!(table.rows[1][1], "9230");
    assert!(!table.is_empty());
}

#[test]
fn test_career_table_keeps_three_columns() {
    let payload = json!({
        "values": [
            {"values": ["Test", "20 Jun 2011", "03 Jan 2025", "10001", "90001"]},
            {"values": []},
            {"values": ["ODI", "18 Aug 2008", "09 Mar 2025", "10002", "90002"]}
        ]
    });

    let response: StatsTableResponse = serde_json::from_value(payload).unwrap();
    let table = response.into_career_table();
    assert_eq!(table.headers, vec!["Format", "Debut", "Last Played"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[1], vec!["ODI", "18 Aug 2008", "09 Mar 2025"]);
}

#[test]
fn test_empty_stats_table() {
    let response: StatsTableResponse = serde_json::from_value(json!({})).unwrap();
    assert!(response.into_table().is_empty());
}
