//! Unit tests for the provider HTTP client

use super::*;
use serde_json::json;
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const TEST_KEY: &str = "test-key";
const TEST_HOST: &str = "cricbuzz-cricket.p.rapidapi.com";

fn client_for(server: &MockServer) -> CricbuzzClient {
    CricbuzzClient::new(server.uri(), TEST_KEY, TEST_HOST, Duration::from_secs(5)).unwrap()
}

fn live_feed() -> serde_json::Value {
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
                                        "matchDesc": "Final",
                                        "matchFormat": "T20",
                                        "startDate": "1758981600000",
                                        "state": "Complete",
                                        "status": "India won by 5 wkts",
                                        "team1": {"teamName": "India", "teamSName": "IND"},
                                        "team2": {"teamName": "Pakistan", "teamSName": "PAK"},
                                        "venueInfo": {"ground": "Dubai International Cricket Stadium", "city": "Dubai"}
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

#[cfg(test)]
mod http_tests {
    use super::*;

    #[tokio::test]
    async fn test_live_matches_sends_rapidapi_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/matches/v1/live"))
            .and(header("x-rapidapi-key", TEST_KEY))
            .and(header("x-rapidapi-host", TEST_HOST))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(live_feed()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let matches = client_for(&mock_server).live_matches().await.unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].match_id, MatchId::new(130179));
        assert_eq!(matches[0].series_label(), "Asia Cup 2025 (International)");
        assert_eq!(matches[0].start_time, Some(1758981600000));
    }

    #[tokio::test]
    async fn test_live_matches_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/matches/v1/live"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).live_matches().await.unwrap_err();
        assert!(matches!(err, LiveStatsError::Http(_)));
        assert!(err.is_provider_error());
    }

    #[tokio::test]
    async fn test_rate_limited_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "message": "You have exceeded the rate limit per second for your plan"
            })))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).live_matches().await;
        assert!(matches!(result, Err(LiveStatsError::Http(_))));
    }

    #[tokio::test]
    async fn test_invalid_json_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("invalid json"))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).live_matches().await;
        assert!(matches!(result, Err(LiveStatsError::Json(_))));
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(live_feed())
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let client = CricbuzzClient::new(
            mock_server.uri(),
            TEST_KEY,
            TEST_HOST,
            Duration::from_millis(50),
        )
        .unwrap();

        match client.live_matches().await {
            Err(LiveStatsError::Http(e)) => assert!(e.is_timeout()),
            other => panic!("Expected timeout, got {:?}", other.map(|m| m.len())),
        }
    }

    #[tokio::test]
    async fn test_missing_api_key_reported_on_fetch() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        let client = CricbuzzClient::from_config(&config).unwrap();

        let err = client.live_matches().await.unwrap_err();
        match err {
            LiveStatsError::MissingApiKey { env_var } => assert_eq!(env_var, "RAPIDAPI_KEY"),
            other => panic!("Expected MissingApiKey, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_from_config_attaches_configured_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/matches/v1/live"))
            .and(header("x-rapidapi-key", "config-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(live_feed()))
            .mount(&mock_server)
            .await;

        let base_url = mock_server.uri();
        let config = AppConfig::from_lookup(|key| match key {
            "RAPIDAPI_KEY" => Some("config-key".to_string()),
            "CRICBUZZ_BASE_URL" => Some(base_url.clone()),
            _ => None,
        })
        .unwrap();
        let client = CricbuzzClient::from_config(&config).unwrap();

        let matches = client.live_matches().await.unwrap();
        assert_eq!(matches.len(), 1);
    }

    #[tokio::test]
    async fn test_scorecard_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/mcenter/v1/130179/scard"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "scorecard": [
                    {
                        "inningsid": 1,
                        "batteamname": "Pakistan",
                        "batsman": [
                            {"id": 8359, "name": "Sahibzada Farhan", "runs": 57, "balls": 38,
                             "fours": 5, "sixes": 3, "strkrate": "150", "outdec": "c Tilak b Varun"}
                        ],
                        "bowler": [
                            {"id": 10945, "name": "Kuldeep Yadav", "overs": "4", "maidens": 0,
                             "runs": 30, "wickets": 4, "economy": "7.5"}
                        ]
                    }
                ],
                "status": "India won by 5 wkts"
            })))
            .mount(&mock_server)
            .await;

        let card = client_for(&mock_server)
            .scorecard(MatchId::new(130179))
            .await
            .unwrap();

        assert_eq!(card.scorecard.len(), 1);
        assert_eq!(card.scorecard[0].batsman[0].strike_rate, 150.0);
        assert_eq!(card.scorecard[0].bowler[0].wickets, 4);
        assert_eq!(card.status.as_deref(), Some("India won by 5 wkts"));
    }

    #[tokio::test]
    async fn test_search_players_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stats/v1/player/search"))
            .and(query_param("plrN", "Kohli"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "player": [
                    {"id": "1413", "name": "Virat Kohli", "teamName": "India", "faceImageId": 332891}
                ],
                "category": "player"
            })))
            .mount(&mock_server)
            .await;

        let players = client_for(&mock_server).search_players(" Kohli ").await.unwrap();

        assert_eq!(players.len(), 1);
        assert_eq!(players[0].id, PlayerId::new(1413));
        assert_eq!(players[0].face_image_id.as_deref(), Some("332891"));
    }

    #[tokio::test]
    async fn test_search_players_blank_name_skips_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&mock_server)
            .await;

        let players = client_for(&mock_server).search_players("   ").await.unwrap();
        assert!(players.is_empty());
    }

    #[tokio::test]
    async fn test_player_profile_and_tables() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stats/v1/player/1413"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "1413",
                "name": "Virat Kohli",
                "role": "Batsman",
                "bat": "Right Handed Bat",
                "bowl": "Right-arm medium",
                "intlTeam": "India"
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/stats/v1/player/1413/batting"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "headers": ["ROWHEADER", "Test", "ODI", "T20"],
                "values": [
                    {"values": ["Matches", "123", "302", "125"]},
                    {"values": ["Runs", "9230", "14181", "4188"]}
                ]
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/stats/v1/player/1413/career"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "headers": ["Format", "Debut", "Last Played"],
                "values": [
                    {"values": ["test", "2011-06-20", "2025-01-03", "10050", "91814"]}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let id = PlayerId::new(1413);

        let profile = client.player_profile(id).await.unwrap();
        assert_eq!(profile.name.as_deref(), Some("Virat Kohli"));
        assert_eq!(profile.batting_style.as_deref(), Some("Right Handed Bat"));

        let batting = client.player_stats(id, StatKind::Batting).await.unwrap();
        assert_eq!(batting.headers.len(), 4);
        assert_eq!(batting.rows[1], vec!["Runs", "9230", "14181", "4188"]);

        let career = client.player_career(id).await.unwrap();
        assert_eq!(career.rows, vec![vec!["test", "2011-06-20", "2025-01-03"]]);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = CricbuzzClient::new(
            "http://localhost:9/",
            TEST_KEY,
            TEST_HOST,
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:9");
    }
}
