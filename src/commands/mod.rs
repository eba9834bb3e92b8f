//! Command implementations for the Cricbuzz LiveStats CLI

pub mod common;
pub mod live_matches;
pub mod players;
pub mod query;
pub mod scorecard;

#[cfg(test)]
mod tests;
