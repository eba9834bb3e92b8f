//! HTTP utilities for provider communication

use crate::Result;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};

pub const RAPIDAPI_KEY_HEADER: &str = "x-rapidapi-key";
pub const RAPIDAPI_HOST_HEADER: &str = "x-rapidapi-host";

/// Build the RapidAPI authentication headers for every provider request.
pub fn rapidapi_header_map(api_key: &str, api_host: &str) -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h.insert(
        HeaderName::from_static(RAPIDAPI_KEY_HEADER),
        HeaderValue::from_str(api_key.trim())?,
    );
    h.insert(
        HeaderName::from_static(RAPIDAPI_HOST_HEADER),
        HeaderValue::from_str(api_host.trim())?,
    );
    Ok(h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LiveStatsError;

    #[test]
    fn test_rapidapi_header_map_contains_auth() {
        let headers = rapidapi_header_map("test_key", "cricbuzz-cricket.p.rapidapi.com").unwrap();

        assert!(headers.contains_key(ACCEPT));
        assert_eq!(headers.get(RAPIDAPI_KEY_HEADER).unwrap(), "test_key");
        assert_eq!(
            headers.get(RAPIDAPI_HOST_HEADER).unwrap(),
            "cricbuzz-cricket.p.rapidapi.com"
        );
    }

    #[test]
    fn test_rapidapi_header_map_rejects_control_chars() {
        let result = rapidapi_header_map("bad\nkey", "host");
        assert!(matches!(result, Err(LiveStatsError::InvalidHeader(_))));
    }
}
