//! Core utilities for the Cricbuzz LiveStats dashboard
//!
//! This module consolidates common utilities that are used across
//! the application:
//! - `config`: Environment-driven settings (API key, database path, polling)
//! - `http`: Provider authentication headers

pub mod config;
pub mod http;

// Re-export commonly used items for convenience
pub use config::{default_database_path, AppConfig};
pub use http::rapidapi_header_map;
