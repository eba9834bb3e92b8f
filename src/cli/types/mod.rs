//! Type-safe wrappers and enums for Cricbuzz data.

pub mod ids;
pub mod stat_kind;

pub use ids::{MatchId, PlayerId};
pub use stat_kind::StatKind;
