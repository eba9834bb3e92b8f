use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use super::render::{error_box, layout};
use crate::error::LiveStatsError;

#[derive(Error, Debug)]
pub enum WebError {
    #[error("{0}")]
    LiveStats(#[from] LiveStatsError),
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Converts `WebError` into an HTML error page.
impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebError::LiveStats(e) if e.is_provider_error() => {
                tracing::warn!(error = %e, "Provider error.");
                StatusCode::BAD_GATEWAY
            }
            WebError::LiveStats(e) if e.is_database_error() => {
                tracing::error!(error = %e, "Database error.");
                StatusCode::BAD_REQUEST
            }
            WebError::LiveStats(e) => {
                tracing::error!(error = %e, "Internal error.");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            WebError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let message = match &self {
            WebError::LiveStats(e) if e.is_provider_error() => format!("Data unavailable: {}", e),
            other => other.to_string(),
        };

        (status, Html(layout("Error", None, &error_box(&message)))).into_response()
    }
}
