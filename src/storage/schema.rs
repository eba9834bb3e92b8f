//! Database schema and connection management

use crate::Result;
use rusqlite::Connection;
use std::path::Path;

/// Database connection manager for cricket data
pub struct CricketDatabase {
    pub(crate) conn: Connection,
}

impl CricketDatabase {
    /// Open (or create) the database file and ensure tables exist
    pub fn open(db_path: &Path) -> Result<Self> {
        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;
        Self::from_connection(conn)
    }

    /// Create an in-memory database, used by tests and throwaway sessions
    pub fn new_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS matches (
                match_id INTEGER PRIMARY KEY,
                series_name TEXT,
                match_desc TEXT,
                match_format TEXT,
                team1 TEXT NOT NULL,
                team2 TEXT NOT NULL,
                venue TEXT,
                city TEXT,
                status TEXT,
                state TEXT,
                start_time INTEGER,
                end_time INTEGER,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS players (
                player_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                role TEXT,
                team TEXT,
                batting_style TEXT,
                bowling_style TEXT
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS squads (
                squad_id INTEGER PRIMARY KEY AUTOINCREMENT,
                team TEXT NOT NULL,
                series_name TEXT NOT NULL,
                UNIQUE (team, series_name)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS squad_members (
                squad_id INTEGER NOT NULL,
                player_id INTEGER NOT NULL,
                PRIMARY KEY (squad_id, player_id),
                FOREIGN KEY (squad_id) REFERENCES squads(squad_id),
                FOREIGN KEY (player_id) REFERENCES players(player_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS batting_stats (
                stat_id INTEGER PRIMARY KEY AUTOINCREMENT,
                player_id INTEGER NOT NULL,
                match_id INTEGER NOT NULL,
                innings INTEGER NOT NULL,
                runs INTEGER NOT NULL DEFAULT 0,
                balls INTEGER NOT NULL DEFAULT 0,
                fours INTEGER NOT NULL DEFAULT 0,
                sixes INTEGER NOT NULL DEFAULT 0,
                strike_rate REAL NOT NULL DEFAULT 0,
                dismissal TEXT,
                FOREIGN KEY (player_id) REFERENCES players(player_id),
                FOREIGN KEY (match_id) REFERENCES matches(match_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS bowling_stats (
                stat_id INTEGER PRIMARY KEY AUTOINCREMENT,
                player_id INTEGER NOT NULL,
                match_id INTEGER NOT NULL,
                innings INTEGER NOT NULL,
                overs REAL NOT NULL DEFAULT 0,
                maidens INTEGER NOT NULL DEFAULT 0,
                runs_conceded INTEGER NOT NULL DEFAULT 0,
                wickets INTEGER NOT NULL DEFAULT 0,
                economy REAL NOT NULL DEFAULT 0,
                FOREIGN KEY (player_id) REFERENCES players(player_id),
                FOREIGN KEY (match_id) REFERENCES matches(match_id)
            )",
            [],
        )?;

        // Indexes for the per-match and per-player stat listings
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_batting_match ON batting_stats(match_id)",
            [],
        )?;
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_batting_player ON batting_stats(player_id)",
            [],
        )?;
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_bowling_match ON bowling_stats(match_id)",
            [],
        )?;
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_bowling_player ON bowling_stats(player_id)",
            [],
        )?;

        Ok(())
    }
}
