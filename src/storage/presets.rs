//! Canned analytics queries offered next to the free-text box.

use serde::Serialize;

/// A numbered, titled SQL template
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PresetQuery {
    pub number: usize,
    pub title: &'static str,
    pub sql: &'static str,
}

pub const PRESET_QUERIES: &[PresetQuery] = &[
    PresetQuery {
        number: 1,
        title: "Players from India: name, role, batting & bowling styles",
        sql: "SELECT name, role, batting_style, bowling_style
FROM players
WHERE team = 'India'
ORDER BY name;",
    },
    PresetQuery {
        number: 2,
        title: "Matches started in the last 30 days (most recent first)",
        sql: "SELECT match_id, match_desc, team1, team2, venue, city,
       datetime(start_time / 1000, 'unixepoch') AS started
FROM matches
WHERE start_time >= (strftime('%s', 'now', '-30 day') * 1000)
ORDER BY start_time DESC;",
    },
    PresetQuery {
        number: 3,
        title: "Top 10 run scorers (total runs, innings, average, 50s, 100s)",
        sql: "SELECT p.name,
       SUM(b.runs) AS total_runs,
       COUNT(*) AS innings,
       ROUND(AVG(b.runs), 2) AS average,
       SUM(CASE WHEN b.runs >= 50 AND b.runs < 100 THEN 1 ELSE 0 END) AS fifties,
       SUM(CASE WHEN b.runs >= 100 THEN 1 ELSE 0 END) AS hundreds
FROM batting_stats b
JOIN players p ON p.player_id = b.player_id
GROUP BY p.player_id, p.name
ORDER BY total_runs DESC
LIMIT 10;",
    },
    PresetQuery {
        number: 4,
        title: "Top 10 wicket takers",
        sql: "SELECT p.name,
       SUM(w.wickets) AS wickets,
       ROUND(SUM(w.overs), 1) AS overs,
       SUM(w.runs_conceded) AS runs_conceded
FROM bowling_stats w
JOIN players p ON p.player_id = w.player_id
GROUP BY p.player_id, p.name
ORDER BY wickets DESC, runs_conceded ASC
LIMIT 10;",
    },
    PresetQuery {
        number: 5,
        title: "Most economical bowlers (at least 2 spells, 2+ overs each on average)",
        sql: "SELECT p.name,
       COUNT(*) AS spells,
       ROUND(AVG(w.overs), 2) AS avg_overs,
       ROUND(SUM(w.runs_conceded) * 1.0 / NULLIF(SUM(w.overs), 0), 2) AS economy
FROM bowling_stats w
JOIN players p ON p.player_id = w.player_id
GROUP BY p.player_id, p.name
HAVING COUNT(*) >= 2 AND AVG(w.overs) >= 2
ORDER BY economy ASC;",
    },
    PresetQuery {
        number: 6,
        title: "Player counts by role",
        sql: "SELECT COALESCE(role, 'Unknown') AS role, COUNT(*) AS players
FROM players
GROUP BY COALESCE(role, 'Unknown')
ORDER BY players DESC;",
    },
    PresetQuery {
        number: 7,
        title: "Highest individual score per match format",
        sql: "SELECT m.match_format, p.name, MAX(b.runs) AS highest_score
FROM batting_stats b
JOIN matches m ON m.match_id = b.match_id
JOIN players p ON p.player_id = b.player_id
GROUP BY m.match_format
ORDER BY highest_score DESC;",
    },
    PresetQuery {
        number: 8,
        title: "Matches hosted per venue",
        sql: "SELECT venue, city, COUNT(*) AS matches
FROM matches
WHERE venue IS NOT NULL
GROUP BY venue, city
ORDER BY matches DESC, venue;",
    },
    PresetQuery {
        number: 9,
        title: "Series covered and number of matches in each",
        sql: "SELECT series_name, COUNT(*) AS matches,
       MIN(datetime(start_time / 1000, 'unixepoch')) AS first_match
FROM matches
WHERE series_name IS NOT NULL
GROUP BY series_name
ORDER BY first_match DESC;",
    },
    PresetQuery {
        number: 10,
        title: "All-rounders: 100+ runs and 5+ wickets across stored matches",
        sql: "SELECT p.name, bat.runs, bowl.wickets
FROM players p
JOIN (SELECT player_id, SUM(runs) AS runs FROM batting_stats GROUP BY player_id) bat
  ON bat.player_id = p.player_id
JOIN (SELECT player_id, SUM(wickets) AS wickets FROM bowling_stats GROUP BY player_id) bowl
  ON bowl.player_id = p.player_id
WHERE bat.runs >= 100 AND bowl.wickets >= 5
ORDER BY bat.runs DESC;",
    },
    PresetQuery {
        number: 11,
        title: "Squad sizes by series",
        sql: "SELECT s.series_name, s.team, COUNT(m.player_id) AS players
FROM squads s
LEFT JOIN squad_members m ON m.squad_id = s.squad_id
GROUP BY s.squad_id
ORDER BY s.series_name, s.team;",
    },
    PresetQuery {
        number: 12,
        title: "Best strike rates (min. 60 balls faced)",
        sql: "SELECT p.name,
       SUM(b.runs) AS runs,
       SUM(b.balls) AS balls,
       ROUND(SUM(b.runs) * 100.0 / SUM(b.balls), 2) AS strike_rate
FROM batting_stats b
JOIN players p ON p.player_id = b.player_id
GROUP BY p.player_id, p.name
HAVING SUM(b.balls) >= 60
ORDER BY strike_rate DESC;",
    },
];

/// Look up a preset by its 1-based number
pub fn preset(number: usize) -> Option<&'static PresetQuery> {
    PRESET_QUERIES.iter().find(|q| q.number == number)
}

/// Default text shown in the playground box, based on the tables picked in the
/// explorer. Two tables are joined on `join_column` when they share one.
pub fn suggested_query(selected_tables: &[String], join_column: Option<&str>) -> String {
    match selected_tables {
        [] => "SELECT name FROM sqlite_master WHERE type='table';".to_string(),
        [only] => format!("SELECT * FROM {} LIMIT 10;", only),
        [first, second, ..] => {
            let column = join_column.unwrap_or("id");
            format!(
                "SELECT *\nFROM {} a\nJOIN {} b\n  ON a.{} = b.{}\nLIMIT 10;",
                first, second, column, column
            )
        }
    }
}
