//! Parameterized CRUD operations per entity

use super::{models::*, schema::CricketDatabase};
use crate::{MatchId, PlayerId, Result};
use rusqlite::{params, OptionalExtension, Row};
use std::time::{SystemTime, UNIX_EPOCH};

const MATCH_COLUMNS: &str = "match_id, series_name, match_desc, match_format, team1, team2,
     venue, city, status, state, start_time, end_time, created_at, updated_at";

const PLAYER_COLUMNS: &str = "player_id, name, role, team, batting_style, bowling_style";

const BATTING_COLUMNS: &str =
    "stat_id, player_id, match_id, innings, runs, balls, fours, sixes, strike_rate, dismissal";

const BOWLING_COLUMNS: &str =
    "stat_id, player_id, match_id, innings, overs, maidens, runs_conceded, wickets, economy";

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

impl CricketDatabase {
    // -----------------------------------------------------------------------
    // Matches
    // -----------------------------------------------------------------------

    /// Create a match. Fails if the id is already taken.
    pub fn insert_match(&mut self, m: &Match) -> Result<()> {
        let now = now_secs();
        self.conn.execute(
            "INSERT INTO matches
             (match_id, series_name, match_desc, match_format, team1, team2,
              venue, city, status, state, start_time, end_time, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                m.match_id.as_i64(),
                m.series_name,
                m.match_desc,
                m.match_format,
                m.team1,
                m.team2,
                m.venue,
                m.city,
                m.status,
                m.state,
                m.start_time,
                m.end_time,
                now,
                now
            ],
        )?;
        Ok(())
    }

    /// Insert or refresh a match, keeping its original `created_at`.
    ///
    /// Uses `ON CONFLICT DO UPDATE` rather than `INSERT OR REPLACE` so stat rows
    /// referencing the match are not disturbed.
    pub fn upsert_match(&mut self, m: &Match) -> Result<()> {
        let now = now_secs();
        self.conn.execute(
            "INSERT INTO matches
             (match_id, series_name, match_desc, match_format, team1, team2,
              venue, city, status, state, start_time, end_time, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)
             ON CONFLICT(match_id) DO UPDATE SET
                series_name = excluded.series_name,
                match_desc = excluded.match_desc,
                match_format = excluded.match_format,
                team1 = excluded.team1,
                team2 = excluded.team2,
                venue = excluded.venue,
                city = excluded.city,
                status = excluded.status,
                state = excluded.state,
                start_time = excluded.start_time,
                end_time = excluded.end_time,
                updated_at = excluded.updated_at",
            params![
                m.match_id.as_i64(),
                m.series_name,
                m.match_desc,
                m.match_format,
                m.team1,
                m.team2,
                m.venue,
                m.city,
                m.status,
                m.state,
                m.start_time,
                m.end_time,
                now
            ],
        )?;
        Ok(())
    }

    /// Get a match by id
    pub fn get_match(&self, match_id: MatchId) -> Result<Option<Match>> {
        let sql = format!("SELECT {} FROM matches WHERE match_id = ?", MATCH_COLUMNS);
        let result = self
            .conn
            .query_row(&sql, params![match_id.as_i64()], |row| {
                Self::row_to_match(row)
            })
            .optional()?;
        Ok(result)
    }

    /// All matches, most recent start first
    pub fn list_matches(&self) -> Result<Vec<Match>> {
        let sql = format!(
            "SELECT {} FROM matches ORDER BY start_time IS NULL, start_time DESC, match_id DESC",
            MATCH_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| Self::row_to_match(row))?;

        let mut matches = Vec::new();
        for row in rows {
            matches.push(row?);
        }
        Ok(matches)
    }

    /// Overwrite the editable fields of a match. Returns false when no such id exists.
    pub fn update_match(&mut self, m: &Match) -> Result<bool> {
        let now = now_secs();
        let rows_affected = self.conn.execute(
            "UPDATE matches SET
                series_name = ?, match_desc = ?, match_format = ?, team1 = ?, team2 = ?,
                venue = ?, city = ?, status = ?, state = ?, start_time = ?, end_time = ?,
                updated_at = ?
             WHERE match_id = ?",
            params![
                m.series_name,
                m.match_desc,
                m.match_format,
                m.team1,
                m.team2,
                m.venue,
                m.city,
                m.status,
                m.state,
                m.start_time,
                m.end_time,
                now,
                m.match_id.as_i64()
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a match. Stats still referencing it make this fail with the
    /// foreign key error; nothing cascades.
    pub fn delete_match(&mut self, match_id: MatchId) -> Result<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM matches WHERE match_id = ?", params![match_id.as_i64()])?;
        Ok(rows_affected > 0)
    }

    fn row_to_match(row: &Row) -> rusqlite::Result<Match> {
        Ok(Match {
            match_id: MatchId::new(row.get(0)?),
            series_name: row.get(1)?,
            match_desc: row.get(2)?,
            match_format: row.get(3)?,
            team1: row.get(4)?,
            team2: row.get(5)?,
            venue: row.get(6)?,
            city: row.get(7)?,
            status: row.get(8)?,
            state: row.get(9)?,
            start_time: row.get(10)?,
            end_time: row.get(11)?,
            created_at: row.get(12)?,
            updated_at: row.get(13)?,
        })
    }

    // -----------------------------------------------------------------------
    // Players
    // -----------------------------------------------------------------------

    /// Create a player. Fails if the id is already taken.
    pub fn insert_player(&mut self, player: &Player) -> Result<()> {
        self.conn.execute(
            "INSERT INTO players (player_id, name, role, team, batting_style, bowling_style)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                player.player_id.as_i64(),
                player.name,
                player.role,
                player.team,
                player.batting_style,
                player.bowling_style
            ],
        )?;
        Ok(())
    }

    /// Insert or update a player's basic information.
    /// Fields the incoming record leaves empty keep their stored value.
    pub fn upsert_player(&mut self, player: &Player) -> Result<()> {
        self.conn.execute(
            "INSERT INTO players (player_id, name, role, team, batting_style, bowling_style)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(player_id) DO UPDATE SET
                name = excluded.name,
                role = COALESCE(excluded.role, players.role),
                team = COALESCE(excluded.team, players.team),
                batting_style = COALESCE(excluded.batting_style, players.batting_style),
                bowling_style = COALESCE(excluded.bowling_style, players.bowling_style)",
            params![
                player.player_id.as_i64(),
                player.name,
                player.role,
                player.team,
                player.batting_style,
                player.bowling_style
            ],
        )?;
        Ok(())
    }

    /// Get a player by id
    pub fn get_player(&self, player_id: PlayerId) -> Result<Option<Player>> {
        let sql = format!("SELECT {} FROM players WHERE player_id = ?", PLAYER_COLUMNS);
        let result = self
            .conn
            .query_row(&sql, params![player_id.as_i64()], |row| {
                Self::row_to_player(row)
            })
            .optional()?;
        Ok(result)
    }

    /// All players ordered by name
    pub fn list_players(&self) -> Result<Vec<Player>> {
        let sql = format!(
            "SELECT {} FROM players ORDER BY name COLLATE NOCASE, player_id",
            PLAYER_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| Self::row_to_player(row))?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    /// Overwrite a player's fields. Returns false when no such id exists.
    pub fn update_player(&mut self, player: &Player) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE players SET name = ?, role = ?, team = ?, batting_style = ?, bowling_style = ?
             WHERE player_id = ?",
            params![
                player.name,
                player.role,
                player.team,
                player.batting_style,
                player.bowling_style,
                player.player_id.as_i64()
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a player. Fails while stats or squad memberships still reference them.
    pub fn delete_player(&mut self, player_id: PlayerId) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "DELETE FROM players WHERE player_id = ?",
            params![player_id.as_i64()],
        )?;
        Ok(rows_affected > 0)
    }

    fn row_to_player(row: &Row) -> rusqlite::Result<Player> {
        Ok(Player {
            player_id: PlayerId::new(row.get(0)?),
            name: row.get(1)?,
            role: row.get(2)?,
            team: row.get(3)?,
            batting_style: row.get(4)?,
            bowling_style: row.get(5)?,
        })
    }

    // -----------------------------------------------------------------------
    // Squads
    // -----------------------------------------------------------------------

    /// Create a squad for a team in a series and return its id
    pub fn create_squad(&mut self, team: &str, series_name: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO squads (team, series_name) VALUES (?, ?)",
            params![team.trim(), series_name.trim()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All squads with their member counts
    pub fn list_squads(&self) -> Result<Vec<Squad>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.squad_id, s.team, s.series_name, COUNT(m.player_id)
             FROM squads s
             LEFT JOIN squad_members m ON m.squad_id = s.squad_id
             GROUP BY s.squad_id, s.team, s.series_name
             ORDER BY s.series_name, s.team",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Squad {
                squad_id: row.get(0)?,
                team: row.get(1)?,
                series_name: row.get(2)?,
                member_count: row.get(3)?,
            })
        })?;

        let mut squads = Vec::new();
        for row in rows {
            squads.push(row?);
        }
        Ok(squads)
    }

    /// Add a player to a squad. Returns false when they were already a member.
    pub fn add_squad_member(&mut self, squad_id: i64, player_id: PlayerId) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "INSERT OR IGNORE INTO squad_members (squad_id, player_id) VALUES (?, ?)",
            params![squad_id, player_id.as_i64()],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn remove_squad_member(&mut self, squad_id: i64, player_id: PlayerId) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "DELETE FROM squad_members WHERE squad_id = ? AND player_id = ?",
            params![squad_id, player_id.as_i64()],
        )?;
        Ok(rows_affected > 0)
    }

    /// Players grouped under a squad
    pub fn squad_members(&self, squad_id: i64) -> Result<Vec<Player>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.player_id, p.name, p.role, p.team, p.batting_style, p.bowling_style
             FROM squad_members m
             JOIN players p ON p.player_id = m.player_id
             WHERE m.squad_id = ?
             ORDER BY p.name COLLATE NOCASE",
        )?;
        let rows = stmt.query_map(params![squad_id], |row| Self::row_to_player(row))?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    /// Delete a squad and its membership rows (two single statements).
    pub fn delete_squad(&mut self, squad_id: i64) -> Result<bool> {
        self.conn.execute(
            "DELETE FROM squad_members WHERE squad_id = ?",
            params![squad_id],
        )?;
        let rows_affected = self
            .conn
            .execute("DELETE FROM squads WHERE squad_id = ?", params![squad_id])?;
        Ok(rows_affected > 0)
    }

    // -----------------------------------------------------------------------
    // Batting / bowling stats
    // -----------------------------------------------------------------------

    /// Insert a batting row and return its new id
    pub fn insert_batting_stat(&mut self, stat: &BattingStat) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO batting_stats
             (player_id, match_id, innings, runs, balls, fours, sixes, strike_rate, dismissal)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                stat.player_id.as_i64(),
                stat.match_id.as_i64(),
                stat.innings,
                stat.runs,
                stat.balls,
                stat.fours,
                stat.sixes,
                stat.strike_rate,
                stat.dismissal
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert a bowling row and return its new id
    pub fn insert_bowling_stat(&mut self, stat: &BowlingStat) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO bowling_stats
             (player_id, match_id, innings, overs, maidens, runs_conceded, wickets, economy)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                stat.player_id.as_i64(),
                stat.match_id.as_i64(),
                stat.innings,
                stat.overs,
                stat.maidens,
                stat.runs_conceded,
                stat.wickets,
                stat.economy
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update_batting_stat(&mut self, stat_id: i64, stat: &BattingStat) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE batting_stats SET
                player_id = ?, match_id = ?, innings = ?, runs = ?, balls = ?, fours = ?,
                sixes = ?, strike_rate = ?, dismissal = ?
             WHERE stat_id = ?",
            params![
                stat.player_id.as_i64(),
                stat.match_id.as_i64(),
                stat.innings,
                stat.runs,
                stat.balls,
                stat.fours,
                stat.sixes,
                stat.strike_rate,
                stat.dismissal,
                stat_id
            ],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn update_bowling_stat(&mut self, stat_id: i64, stat: &BowlingStat) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE bowling_stats SET
                player_id = ?, match_id = ?, innings = ?, overs = ?, maidens = ?,
                runs_conceded = ?, wickets = ?, economy = ?
             WHERE stat_id = ?",
            params![
                stat.player_id.as_i64(),
                stat.match_id.as_i64(),
                stat.innings,
                stat.overs,
                stat.maidens,
                stat.runs_conceded,
                stat.wickets,
                stat.economy,
                stat_id
            ],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn delete_batting_stat(&mut self, stat_id: i64) -> Result<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM batting_stats WHERE stat_id = ?", params![stat_id])?;
        Ok(rows_affected > 0)
    }

    pub fn delete_bowling_stat(&mut self, stat_id: i64) -> Result<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM bowling_stats WHERE stat_id = ?", params![stat_id])?;
        Ok(rows_affected > 0)
    }

    pub fn batting_stats_for_match(&self, match_id: MatchId) -> Result<Vec<BattingStat>> {
        self.batting_stats_where(Some(("match_id", match_id.as_i64())))
    }

    pub fn batting_stats_for_player(&self, player_id: PlayerId) -> Result<Vec<BattingStat>> {
        self.batting_stats_where(Some(("player_id", player_id.as_i64())))
    }

    pub fn bowling_stats_for_match(&self, match_id: MatchId) -> Result<Vec<BowlingStat>> {
        self.bowling_stats_where(Some(("match_id", match_id.as_i64())))
    }

    pub fn bowling_stats_for_player(&self, player_id: PlayerId) -> Result<Vec<BowlingStat>> {
        self.bowling_stats_where(Some(("player_id", player_id.as_i64())))
    }

    /// Every batting row, newest first
    pub fn list_batting_stats(&self) -> Result<Vec<BattingStat>> {
        self.batting_stats_where(None)
    }

    /// Every bowling row, newest first
    pub fn list_bowling_stats(&self) -> Result<Vec<BowlingStat>> {
        self.bowling_stats_where(None)
    }

    /// `filter` is a trusted column name and the id it must equal.
    fn batting_stats_where(&self, filter: Option<(&str, i64)>) -> Result<Vec<BattingStat>> {
        let (condition, value) = match filter {
            Some((column, value)) => (format!("WHERE {} = ?1", column), Some(value)),
            None => (String::new(), None),
        };
        let sql = format!(
            "SELECT {} FROM batting_stats {} ORDER BY match_id DESC, innings, stat_id",
            BATTING_COLUMNS, condition
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let bound: Vec<i64> = value.into_iter().collect();
        let rows = stmt.query_map(rusqlite::params_from_iter(bound), |row| {
            Ok(BattingStat {
                stat_id: Some(row.get(0)?),
                player_id: PlayerId::new(row.get(1)?),
                match_id: MatchId::new(row.get(2)?),
                innings: row.get(3)?,
                runs: row.get(4)?,
                balls: row.get(5)?,
                fours: row.get(6)?,
                sixes: row.get(7)?,
                strike_rate: row.get(8)?,
                dismissal: row.get(9)?,
            })
        })?;

        let mut stats = Vec::new();
        for row in rows {
            stats.push(row?);
        }
        Ok(stats)
    }

    /// `filter` is a trusted column name and the id it must equal.
    fn bowling_stats_where(&self, filter: Option<(&str, i64)>) -> Result<Vec<BowlingStat>> {
        let (condition, value) = match filter {
            Some((column, value)) => (format!("WHERE {} = ?1", column), Some(value)),
            None => (String::new(), None),
        };
        let sql = format!(
            "SELECT {} FROM bowling_stats {} ORDER BY match_id DESC, innings, stat_id",
            BOWLING_COLUMNS, condition
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let bound: Vec<i64> = value.into_iter().collect();
        let rows = stmt.query_map(rusqlite::params_from_iter(bound), |row| {
            Ok(BowlingStat {
                stat_id: Some(row.get(0)?),
                player_id: PlayerId::new(row.get(1)?),
                match_id: MatchId::new(row.get(2)?),
                innings: row.get(3)?,
                overs: row.get(4)?,
                maidens: row.get(5)?,
                runs_conceded: row.get(6)?,
                wickets: row.get(7)?,
                economy: row.get(8)?,
            })
        })?;

        let mut stats = Vec::new();
        for row in rows {
            stats.push(row?);
        }
        Ok(stats)
    }

    /// Replace every stat row of a match with a freshly fetched scorecard.
    ///
    /// Runs as separate single statements; a failure part way leaves the rows
    /// written so far in place.
    pub fn replace_match_scorecard(
        &mut self,
        match_id: MatchId,
        batting: &[BattingStat],
        bowling: &[BowlingStat],
    ) -> Result<usize> {
        self.conn.execute(
            "DELETE FROM batting_stats WHERE match_id = ?",
            params![match_id.as_i64()],
        )?;
        self.conn.execute(
            "DELETE FROM bowling_stats WHERE match_id = ?",
            params![match_id.as_i64()],
        )?;

        let mut written = 0;
        for stat in batting {
            self.insert_batting_stat(stat)?;
            written += 1;
        }
        for stat in bowling {
            self.insert_bowling_stat(stat)?;
            written += 1;
        }
        Ok(written)
    }

    /// Remove every row from every table (children first).
    pub fn clear_all_data(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "DELETE FROM batting_stats;
             DELETE FROM bowling_stats;
             DELETE FROM squad_members;
             DELETE FROM squads;
             DELETE FROM players;
             DELETE FROM matches;",
        )?;
        Ok(())
    }
}
