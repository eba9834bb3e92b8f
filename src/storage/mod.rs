//! Storage layer for the Cricbuzz LiveStats dashboard
//!
//! This module provides a thin abstraction over the SQLite database,
//! organized into logical components:
//! - `models`: Data structures
//! - `schema`: Database connection and schema management
//! - `queries`: Parameterized CRUD operations per entity
//! - `playground`: Free-text SQL execution and generic table tools
//! - `presets`: Canned analytics queries

pub mod models;
pub mod playground;
pub mod presets;
pub mod queries;
pub mod schema;


// Re-export the main types and database struct for easy access
pub use models::*;
pub use presets::{preset, PresetQuery, PRESET_QUERIES};
pub use schema::CricketDatabase;
