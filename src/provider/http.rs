//! HTTP client for the Cricbuzz RapidAPI endpoints.
//!
//! Every operation is one GET with the RapidAPI headers attached. There is no
//! caching or retry here: a failed call surfaces as an error and the caller
//! decides what to show instead.

use std::time::Duration;

use reqwest::{header::HeaderMap, Client};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::{
    LiveMatchesResponse, MatchRecord, PlayerProfile, PlayerSearchResponse, PlayerSummary,
    Scorecard, StatsTable, StatsTableResponse,
};
use crate::{
    core::{rapidapi_header_map, AppConfig},
    error::LiveStatsError,
    MatchId, PlayerId, Result, StatKind,
};

#[cfg(test)]
mod tests;

/// Thin wrapper over `reqwest::Client` bound to one provider base URL.
#[derive(Debug, Clone)]
pub struct CricbuzzClient {
    http: Client,
    base_url: String,
    headers: Option<HeaderMap>,
}

impl CricbuzzClient {
    /// Build a client against `base_url` with the given credentials.
    pub fn new(
        base_url: impl Into<String>,
        api_key: &str,
        api_host: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let headers = rapidapi_header_map(api_key, api_host)?;
        Ok(Self {
            http: Self::build_http(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            headers: Some(headers),
        })
    }

    /// Build a client from configuration.
    ///
    /// A missing API key does not fail here; the dashboard still serves stored
    /// data, and each fetch reports [`LiveStatsError::MissingApiKey`] instead.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let headers = match config.require_api_key() {
            Ok(key) => Some(rapidapi_header_map(key, &config.api_host)?),
            Err(err) => {
                debug!(%err, "provider client built without credentials");
                None
            }
        };
        Ok(Self {
            http: Self::build_http(Duration::from_secs(config.request_timeout_secs))?,
            base_url: config.base_url.clone(),
            headers,
        })
    }

    fn build_http(timeout: Duration) -> Result<Client> {
        let client = Client::builder()
            .user_agent(concat!("cricbuzz-livestats/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(client)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let headers = self
            .headers
            .clone()
            .ok_or_else(|| LiveStatsError::MissingApiKey {
                env_var: crate::core::config::API_KEY_ENV_VAR.to_string(),
            })?;

        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "provider request");

        let res = self
            .http
            .get(&url)
            .headers(headers)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        let body = res.text().await?;
        debug!(%url, bytes = body.len(), "provider response");
        Ok(serde_json::from_str(&body)?)
    }

    /// Currently live (and recently finished) matches, flattened.
    pub async fn live_matches(&self) -> Result<Vec<MatchRecord>> {
        let envelope: LiveMatchesResponse = self.get_json("/matches/v1/live", &[]).await?;
        Ok(envelope.into_records())
    }

    /// Full scorecard for a match
    pub async fn scorecard(&self, match_id: MatchId) -> Result<Scorecard> {
        let path = format!("/mcenter/v1/{}/scard", match_id);
        self.get_json(&path, &[]).await
    }

    /// Players whose name matches `name`
    pub async fn search_players(&self, name: &str) -> Result<Vec<PlayerSummary>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(Vec::new());
        }
        let envelope: PlayerSearchResponse = self
            .get_json("/stats/v1/player/search", &[("plrN", name)])
            .await?;
        Ok(envelope.player)
    }

    pub async fn player_profile(&self, player_id: PlayerId) -> Result<PlayerProfile> {
        let path = format!("/stats/v1/player/{}", player_id);
        self.get_json(&path, &[]).await
    }

    /// Batting or bowling summary table across formats
    pub async fn player_stats(&self, player_id: PlayerId, kind: StatKind) -> Result<StatsTable> {
        let path = format!("/stats/v1/player/{}/{}", player_id, kind.as_path());
        let raw: StatsTableResponse = self.get_json(&path, &[]).await?;
        Ok(raw.into_table())
    }

    /// Debut and last-played per format
    pub async fn player_career(&self, player_id: PlayerId) -> Result<StatsTable> {
        let path = format!("/stats/v1/player/{}/career", player_id);
        let raw: StatsTableResponse = self.get_json(&path, &[]).await?;
        Ok(raw.into_career_table())
    }
}
