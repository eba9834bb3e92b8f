//! Error types for the Cricbuzz LiveStats dashboard

use thiserror::Error;


pub type Result<T> = std::result::Result<T, LiveStatsError>;

#[derive(Error, Debug)]
pub enum LiveStatsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("API key not provided and {env_var} environment variable not set")]
    MissingApiKey { env_var: String },

    #[error("Failed to parse identifier: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("Invalid stat kind: {kind}")]
    InvalidStatKind { kind: String },

    #[error("{0}")]
    Database(#[from] rusqlite::Error),

    #[error("{message}")]
    Query { message: String },

    #[error("Unknown table: {table}")]
    InvalidTable { table: String },

    #[error("Unknown column '{column}' in table {table}")]
    InvalidColumn { table: String, column: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl LiveStatsError {
    /// Errors raised while talking to the provider. The dashboard shows these as
    /// "data unavailable" and keeps whatever is already stored.
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            LiveStatsError::Http(_)
                | LiveStatsError::Json(_)
                | LiveStatsError::InvalidHeader(_)
                | LiveStatsError::MissingApiKey { .. }
        )
    }

    /// Errors raised by the store, surfaced verbatim in the query tools.
    pub fn is_database_error(&self) -> bool {
        matches!(
            self,
            LiveStatsError::Database(_)
                | LiveStatsError::Query { .. }
                | LiveStatsError::InvalidTable { .. }
                | LiveStatsError::InvalidColumn { .. }
        )
    }

    pub(crate) fn query(message: impl Into<String>) -> Self {
        LiveStatsError::Query {
            message: message.into(),
        }
    }
}
