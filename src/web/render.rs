//! HTML rendering for every page.
//!
//! Pages are plain strings built from escaped fragments. Every render reads
//! the values it is handed and nothing else, so a page always reflects the
//! state read in the same request.

use crate::{
    commands::{live_matches::group_by_series, players::profile_lines},
    core::AppConfig,
    provider::{
        face_image_url, format_score, format_time, MatchRecord, PlayerProfile, PlayerSummary,
        Scorecard, StatsTable,
    },
    storage::{
        BattingStat, BowlingStat, ColumnInfo, Match, Player, PresetQuery, QueryOutcome,
        QueryResult, Squad, TableChange,
    },
    MatchId, PlayerId,
};
use url::form_urlencoded;

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:0;color:#222}\
header{background:linear-gradient(90deg,#ff6b6b,#4ecdc4);color:#fff;padding:.8rem 1.5rem}\
header a{color:#fff;margin-right:1rem;text-decoration:none;font-weight:600}\
main{padding:1rem 1.5rem}\
table{border-collapse:collapse;margin:.5rem 0 1rem}\
th,td{border:1px solid #ddd;padding:.3rem .6rem;text-align:left;font-size:.9rem}\
th{background:#f4f4f4}\
.error{background:#fde2e2;border:1px solid #f5a5a5;padding:.6rem;margin:.5rem 0}\
.ok{background:#e2f7e2;border:1px solid #9bd59b;padding:.6rem;margin:.5rem 0}\
.card{border:1px solid #ddd;border-radius:8px;padding:.6rem 1rem;margin:.5rem 0}\
pre{background:#f7f7f7;padding:.5rem;overflow-x:auto}\
form.inline{display:inline}\
textarea{width:100%;font-family:monospace}";

/// Escape text for use inside HTML element content or quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// `/players` link that keeps the search box filled and selects one player.
fn player_link(name: &str, player_id: PlayerId) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("name", name)
        .append_pair("player_id", &player_id.to_string())
        .finish();
    format!("/players?{}", query)
}

/// Wrap a body in the shared page chrome. `refresh_secs` adds a meta refresh.
pub fn layout(title: &str, refresh_secs: Option<u64>, body: &str) -> String {
    let refresh = refresh_secs
        .map(|secs| format!("<meta http-equiv=\"refresh\" content=\"{}\">", secs))
        .unwrap_or_default();
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n{refresh}\n\
         <title>{title} - Cricbuzz LiveStats</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <header><strong>Cricbuzz LiveStats</strong> &nbsp; \
         <a href=\"/\">Home</a><a href=\"/live\">Live Matches</a><a href=\"/players\">Players</a>\
         <a href=\"/sql\">SQL Analytics</a><a href=\"/crud\">CRUD</a><a href=\"/tables\">Tables</a>\
         </header>\n<main>\n<h1>{title}</h1>\n{body}\n</main>\n</body>\n</html>\n",
        refresh = refresh,
        title = escape(title),
        STYLE = STYLE,
        body = body,
    )
}

pub fn error_box(message: &str) -> String {
    format!("<div class=\"error\">{}</div>", escape(message))
}

pub fn ok_box(message: &str) -> String {
    format!("<div class=\"ok\">{}</div>", escape(message))
}

/// Render a header row and string cells; cells are escaped.
pub fn table(headers: &[String], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return "<p><em>No rows.</em></p>".to_string();
    }
    let mut html = String::from("<table><thead><tr>");
    for h in headers {
        html.push_str(&format!("<th>{}</th>", escape(h)));
    }
    html.push_str("</tr></thead><tbody>");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

pub fn query_result_table(result: &QueryResult) -> String {
    let rows: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect();
    format!(
        "{}<p>{} rows</p>",
        table(&result.columns, &rows),
        rows.len()
    )
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Home
// ---------------------------------------------------------------------------

pub fn home_page(config: &AppConfig, table_counts: &[(String, i64)]) -> String {
    let mut body = String::from(
        "<p>Real-time cricket insights from the Cricbuzz feed, mirrored into a local \
         SQLite database for SQL analytics.</p><ul>\
         <li><a href=\"/live\">Live Matches</a>: current matches grouped by series, \
         auto-refreshing</li>\
         <li><a href=\"/players\">Players</a>: search, profile and career stats</li>\
         <li><a href=\"/sql\">SQL Analytics</a>: canned queries and a free-text query box</li>\
         <li><a href=\"/crud\">CRUD</a>: manage matches, players, squads and stats</li>\
         <li><a href=\"/tables\">Tables</a>: browse and edit any table</li></ul>",
    );

    if config.api_key.is_none() {
        body.push_str(&error_box(
            "RAPIDAPI_KEY is not set; live data pages will show stored data only.",
        ));
    }

    body.push_str(&format!(
        "<h2>Database</h2><p><code>{}</code>, live page refresh every {}s</p>",
        escape(&config.database_path.display().to_string()),
        config.refresh_interval_secs
    ));
    let rows: Vec<Vec<String>> = table_counts
        .iter()
        .map(|(t, n)| vec![t.clone(), n.to_string()])
        .collect();
    body.push_str(&table(&strings(&["Table", "Rows"]), &rows));

    layout("Home", None, &body)
}

// ---------------------------------------------------------------------------
// Live matches
// ---------------------------------------------------------------------------

/// Everything the live page shows for one request.
pub struct LiveView<'a> {
    pub series: Option<&'a str>,
    /// Fresh records, or the fetch error text
    pub fetched: Result<Vec<MatchRecord>, String>,
    /// Matches already in the store, shown when the fetch fails
    pub stored: Vec<Match>,
    /// Mirror failure, if any
    pub store_error: Option<String>,
    pub refresh_secs: u64,
}

fn match_card(m: &MatchRecord) -> String {
    format!(
        "<div class=\"card\"><strong>{team1} vs {team2}</strong> &middot; {desc} &middot; {format}<br>\
         {t1s}: {s1} &nbsp; | &nbsp; {t2s}: {s2}<br>\
         <em>{state}</em> {status}<br>\
         {venue} &middot; starts {start}<br>\
         <a href=\"/live/{id}/scorecard\">Scorecard</a></div>",
        team1 = escape(&m.team1),
        team2 = escape(&m.team2),
        desc = escape(m.match_desc.as_deref().unwrap_or("")),
        format = escape(m.match_format.as_deref().unwrap_or("")),
        t1s = escape(m.team1_short.as_deref().unwrap_or(&m.team1)),
        s1 = escape(&format_score(m.team1_score)),
        t2s = escape(m.team2_short.as_deref().unwrap_or(&m.team2)),
        s2 = escape(&format_score(m.team2_score)),
        state = escape(m.state.as_deref().unwrap_or("Unknown")),
        status = escape(m.status.as_deref().unwrap_or("")),
        venue = escape(&[m.venue.clone(), m.city.clone()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ")),
        start = escape(&format_time(m.start_time)),
        id = m.match_id,
    )
}

pub fn stored_matches_table(matches: &[Match]) -> String {
    let rows: Vec<Vec<String>> = matches
        .iter()
        .map(|m| {
            vec![
                m.match_id.to_string(),
                opt(&m.series_name),
                format!("{} vs {}", m.team1, m.team2),
                opt(&m.match_desc),
                opt(&m.venue),
                opt(&m.status),
                format_time(m.start_time),
            ]
        })
        .collect();
    table(
        &strings(&["ID", "Series", "Teams", "Match", "Venue", "Status", "Start"]),
        &rows,
    )
}

pub fn live_page(view: &LiveView<'_>) -> String {
    let mut body = format!(
        "<form method=\"get\" action=\"/live\">Series filter: \
         <input name=\"series\" value=\"{}\"> <button>Apply</button></form>\
         <p><small>Refreshes every {}s.</small></p>",
        escape(view.series.unwrap_or("")),
        view.refresh_secs
    );

    if let Some(err) = &view.store_error {
        body.push_str(&error_box(&format!("Could not save matches: {}", err)));
    }

    match &view.fetched {
        Err(message) => {
            body.push_str(&error_box(&format!("Data unavailable: {}", message)));
            body.push_str("<h2>Stored matches</h2>");
            body.push_str(&stored_matches_table(&view.stored));
        }
        Ok(records) if records.is_empty() => {
            body.push_str("<p>No live matches right now.</p>");
        }
        Ok(records) => {
            for (label, matches) in group_by_series(records) {
                body.push_str(&format!("<h2>{}</h2>", escape(&label)));
                for m in matches {
                    body.push_str(&match_card(m));
                }
            }
        }
    }

    layout("Live Matches", Some(view.refresh_secs), &body)
}

/// `store_error` is the mirror failure, if any; the fetched card is still shown.
pub fn scorecard_page(
    match_id: MatchId,
    card: &Result<Scorecard, String>,
    store_error: Option<&str>,
) -> String {
    let mut body = format!(
        "<p><a href=\"/live\">&larr; Back to live matches</a></p><p>Match {}</p>",
        match_id
    );
    if let Some(err) = store_error {
        body.push_str(&error_box(&format!("Could not save scorecard: {}", err)));
    }
    match card {
        Err(message) => body.push_str(&error_box(&format!("Data unavailable: {}", message))),
        Ok(card) if card.scorecard.is_empty() => {
            body.push_str("<p>No scorecard available for this match yet.</p>")
        }
        Ok(card) => {
            for (idx, innings) in card.scorecard.iter().enumerate() {
                body.push_str(&format!(
                    "<h2>Innings {}: {}</h2>",
                    idx + 1,
                    escape(&innings.bat_team_name)
                ));
                let (headers, rows) = crate::commands::scorecard::batting_table(card, idx);
                body.push_str(&table(&headers, &rows));
                let (headers, rows) = crate::commands::scorecard::bowling_table(card, idx);
                body.push_str(&table(&headers, &rows));
            }
            if let Some(status) = &card.status {
                body.push_str(&format!("<p><strong>{}</strong></p>", escape(status)));
            }
        }
    }
    layout("Scorecard", None, &body)
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// Provider data for one selected player; each part fails independently.
pub struct PlayerDetail {
    pub profile: Result<PlayerProfile, String>,
    pub career: Result<StatsTable, String>,
    pub batting: Result<StatsTable, String>,
    pub bowling: Result<StatsTable, String>,
}

fn stats_section(title: &str, stats: &Result<StatsTable, String>) -> String {
    let inner = match stats {
        Err(message) => error_box(&format!("Data unavailable: {}", message)),
        Ok(t) if t.is_empty() => "<p><em>No data.</em></p>".to_string(),
        Ok(t) => table(&t.headers, &t.rows),
    };
    format!("<h3>{}</h3>{}", escape(title), inner)
}

pub fn players_page(
    name: &str,
    results: Option<&Result<Vec<PlayerSummary>, String>>,
    detail: Option<&PlayerDetail>,
    notice: Option<&str>,
) -> String {
    let mut body = format!(
        "<form method=\"get\" action=\"/players\">Player name: \
         <input name=\"name\" value=\"{}\"> <button>Search</button></form>",
        escape(name)
    );
    if let Some(n) = notice {
        body.push_str(&error_box(n));
    }

    match results {
        None => {}
        Some(Err(message)) => body.push_str(&error_box(&format!("Data unavailable: {}", message))),
        Some(Ok(players)) if players.is_empty() => body.push_str("<p>No players found.</p>"),
        Some(Ok(players)) => {
            body.push_str("<ul>");
            for p in players {
                body.push_str(&format!(
                    "<li><a href=\"{}\">{}</a> ({}) &middot; DOB: {}</li>",
                    escape(&player_link(name, p.id)),
                    escape(&p.name),
                    escape(p.team_name.as_deref().unwrap_or("Unknown team")),
                    escape(p.dob.as_deref().unwrap_or("N/A"))
                ));
            }
            body.push_str("</ul>");
        }
    }

    if let Some(detail) = detail {
        match &detail.profile {
            Err(message) => body.push_str(&error_box(&format!("Data unavailable: {}", message))),
            Ok(profile) => {
                let title = profile.name.as_deref().unwrap_or("Player");
                body.push_str(&format!("<h2>{}</h2>", escape(title)));

                let summary = results
                    .and_then(|r| r.as_ref().ok())
                    .and_then(|players| players.iter().find(|p| Some(p.id) == profile.id));
                if let Some(summary) = summary {
                    if let Some(image_id) = &summary.face_image_id {
                        body.push_str(&format!(
                            "<img src=\"{}\" alt=\"{}\" width=\"150\">",
                            escape(&face_image_url(image_id)),
                            escape(title)
                        ));
                    }
                    body.push_str(&format!(
                        "<p>DOB: {}</p>",
                        escape(summary.dob.as_deref().unwrap_or("N/A"))
                    ));
                }

                let rows: Vec<Vec<String>> = profile_lines(profile)
                    .into_iter()
                    .map(|(k, v)| vec![k, v])
                    .collect();
                body.push_str(&table(&strings(&["Field", "Value"]), &rows));
                if let Some(url) = profile.web_url.as_deref().filter(|u| !u.trim().is_empty()) {
                    body.push_str(&format!(
                        "<p><a href=\"{}\">View on Cricbuzz</a></p>",
                        escape(url)
                    ));
                }
            }
        }
        body.push_str(&stats_section("Career", &detail.career));
        body.push_str(&stats_section("Batting", &detail.batting));
        body.push_str(&stats_section("Bowling", &detail.bowling));
    }

    layout("Players", None, &body)
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// Snapshot of every entity listing shown on the CRUD page.
#[derive(Debug, Default)]
pub struct CrudView {
    pub matches: Vec<Match>,
    pub players: Vec<Player>,
    pub squads: Vec<(Squad, Vec<Player>)>,
    pub batting: Vec<BattingStat>,
    pub bowling: Vec<BowlingStat>,
}

fn input(name: &str, label: &str, value: &str) -> String {
    format!(
        "<label>{label} <input name=\"{name}\" value=\"{value}\"></label> ",
        label = escape(label),
        name = name,
        value = escape(value)
    )
}

fn post_button(action: &str, label: &str) -> String {
    format!(
        "<form class=\"inline\" method=\"post\" action=\"{}\"><button>{}</button></form>",
        action,
        escape(label)
    )
}

fn match_fields(m: Option<&Match>) -> String {
    let get = |f: fn(&Match) -> Option<String>| m.and_then(f).unwrap_or_default();
    let mut html = String::new();
    if m.is_none() {
        html.push_str(&input("match_id", "ID", ""));
    }
    html.push_str(&input("team1", "Team 1", &get(|m| Some(m.team1.clone()))));
    html.push_str(&input("team2", "Team 2", &get(|m| Some(m.team2.clone()))));
    html.push_str(&input("series_name", "Series", &get(|m| m.series_name.clone())));
    html.push_str(&input("match_desc", "Match", &get(|m| m.match_desc.clone())));
    html.push_str(&input("match_format", "Format", &get(|m| m.match_format.clone())));
    html.push_str(&input("venue", "Venue", &get(|m| m.venue.clone())));
    html.push_str(&input("city", "City", &get(|m| m.city.clone())));
    html.push_str(&input("status", "Status", &get(|m| m.status.clone())));
    html.push_str(&input("state", "State", &get(|m| m.state.clone())));
    html.push_str(&input(
        "start_time",
        "Start (epoch ms)",
        &get(|m| m.start_time.map(|t| t.to_string())),
    ));
    html.push_str(&input(
        "end_time",
        "End (epoch ms)",
        &get(|m| m.end_time.map(|t| t.to_string())),
    ));
    html
}

fn player_fields(p: Option<&Player>) -> String {
    let get = |f: fn(&Player) -> Option<String>| p.and_then(f).unwrap_or_default();
    let mut html = String::new();
    if p.is_none() {
        html.push_str(&input("player_id", "ID", ""));
    }
    html.push_str(&input("name", "Name", &get(|p| Some(p.name.clone()))));
    html.push_str(&input("role", "Role", &get(|p| p.role.clone())));
    html.push_str(&input("team", "Team", &get(|p| p.team.clone())));
    html.push_str(&input("batting_style", "Batting", &get(|p| p.batting_style.clone())));
    html.push_str(&input("bowling_style", "Bowling", &get(|p| p.bowling_style.clone())));
    html
}

pub fn crud_page(view: &CrudView, error: Option<&str>) -> String {
    let mut body = String::new();
    if let Some(e) = error {
        body.push_str(&error_box(e));
    }

    // Matches
    body.push_str("<h2>Matches</h2>");
    body.push_str(&format!(
        "<form method=\"post\" action=\"/crud/matches\">{}<button>Create match</button></form>",
        match_fields(None)
    ));
    body.push_str(&stored_matches_table(&view.matches));
    for m in &view.matches {
        body.push_str(&format!(
            "<details><summary>Edit match {id}</summary>\
             <form method=\"post\" action=\"/crud/matches/{id}/update\">{fields}<button>Save</button></form>\
             {delete}</details>",
            id = m.match_id,
            fields = match_fields(Some(m)),
            delete = post_button(&format!("/crud/matches/{}/delete", m.match_id), "Delete match"),
        ));
    }

    // Players
    body.push_str("<h2>Players</h2>");
    body.push_str(&format!(
        "<form method=\"post\" action=\"/crud/players\">{}<button>Create player</button></form>",
        player_fields(None)
    ));
    let rows: Vec<Vec<String>> = view
        .players
        .iter()
        .map(|p| {
            vec![
                p.player_id.to_string(),
                p.name.clone(),
                opt(&p.role),
                opt(&p.team),
                opt(&p.batting_style),
                opt(&p.bowling_style),
            ]
        })
        .collect();
    body.push_str(&table(
        &strings(&["ID", "Name", "Role", "Team", "Batting", "Bowling"]),
        &rows,
    ));
    for p in &view.players {
        body.push_str(&format!(
            "<details><summary>Edit {name}</summary>\
             <form method=\"post\" action=\"/crud/players/{id}/update\">{fields}<button>Save</button></form>\
             {delete}</details>",
            name = escape(&p.name),
            id = p.player_id,
            fields = player_fields(Some(p)),
            delete = post_button(&format!("/crud/players/{}/delete", p.player_id), "Delete player"),
        ));
    }

    // Squads
    body.push_str("<h2>Squads</h2>");
    body.push_str(&format!(
        "<form method=\"post\" action=\"/crud/squads\">{}{}<button>Create squad</button></form>",
        input("team", "Team", ""),
        input("series_name", "Series", "")
    ));
    for (squad, members) in &view.squads {
        let names: Vec<String> = members
            .iter()
            .map(|p| format!("{} ({})", p.name, p.player_id))
            .collect();
        body.push_str(&format!(
            "<div class=\"card\"><strong>{team}</strong> &middot; {series} &middot; {count} players<br>{names}<br>\
             <form class=\"inline\" method=\"post\" action=\"/crud/squads/{id}/members\">{pid}\
             <select name=\"action\"><option value=\"add\">Add</option><option value=\"remove\">Remove</option></select>\
             <button>Apply</button></form> {delete}</div>",
            team = escape(&squad.team),
            series = escape(&squad.series_name),
            count = squad.member_count,
            names = escape(&names.join(", ")),
            id = squad.squad_id,
            pid = input("player_id", "Player ID", ""),
            delete = post_button(&format!("/crud/squads/{}/delete", squad.squad_id), "Delete squad"),
        ));
    }

    // Batting stats
    body.push_str("<h2>Batting stats</h2>");
    body.push_str(&format!(
        "<form method=\"post\" action=\"/crud/batting\">{}{}{}{}{}{}{}{}<button>Add batting row</button></form>",
        input("player_id", "Player ID", ""),
        input("match_id", "Match ID", ""),
        input("innings", "Innings", "1"),
        input("runs", "Runs", ""),
        input("balls", "Balls", ""),
        input("fours", "4s", ""),
        input("sixes", "6s", ""),
        input("dismissal", "Dismissal", ""),
    ));
    let mut batting_rows = Vec::new();
    for s in &view.batting {
        let id = s.stat_id.unwrap_or_default();
        batting_rows.push(format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td><td>{}</td><td>{}</td></tr>",
            id,
            s.player_id,
            s.match_id,
            s.innings,
            s.runs,
            s.balls,
            s.fours,
            s.sixes,
            s.strike_rate,
            escape(s.dismissal.as_deref().unwrap_or("")),
            post_button(&format!("/crud/batting/{}/delete", id), "Delete")
        ));
    }
    body.push_str(&raw_table(
        &["ID", "Player", "Match", "Inn", "R", "B", "4s", "6s", "SR", "Dismissal", ""],
        &batting_rows,
    ));

    // Bowling stats
    body.push_str("<h2>Bowling stats</h2>");
    body.push_str(&format!(
        "<form method=\"post\" action=\"/crud/bowling\">{}{}{}{}{}{}{}<button>Add bowling row</button></form>",
        input("player_id", "Player ID", ""),
        input("match_id", "Match ID", ""),
        input("innings", "Innings", "1"),
        input("overs", "Overs", ""),
        input("maidens", "Maidens", ""),
        input("runs_conceded", "Runs", ""),
        input("wickets", "Wickets", ""),
    ));
    let mut bowling_rows = Vec::new();
    for s in &view.bowling {
        let id = s.stat_id.unwrap_or_default();
        bowling_rows.push(format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td><td>{}</td></tr>",
            id,
            s.player_id,
            s.match_id,
            s.innings,
            s.overs,
            s.maidens,
            s.runs_conceded,
            s.wickets,
            s.economy,
            post_button(&format!("/crud/bowling/{}/delete", id), "Delete")
        ));
    }
    body.push_str(&raw_table(
        &["ID", "Player", "Match", "Inn", "O", "M", "R", "W", "Econ", ""],
        &bowling_rows,
    ));

    layout("CRUD Operations", None, &body)
}

/// Table whose rows are already rendered HTML.
fn raw_table(headers: &[&str], rows: &[String]) -> String {
    if rows.is_empty() {
        return "<p><em>No rows.</em></p>".to_string();
    }
    let head: String = headers
        .iter()
        .map(|h| format!("<th>{}</th>", escape(h)))
        .collect();
    format!(
        "<table><thead><tr>{}</tr></thead><tbody>{}</tbody></table>",
        head,
        rows.concat()
    )
}

// ---------------------------------------------------------------------------
// SQL playground
// ---------------------------------------------------------------------------

pub struct SqlView<'a> {
    pub presets: &'a [PresetQuery],
    pub selected_preset: Option<usize>,
    pub tables: Vec<String>,
    pub sql: String,
    pub outcome: Option<Result<QueryOutcome, String>>,
}

pub fn sql_page(view: &SqlView<'_>) -> String {
    let mut body = String::from("<h2>Canned queries</h2><ol>");
    for q in view.presets {
        let marker = if view.selected_preset == Some(q.number) {
            " <strong>&larr;</strong>"
        } else {
            ""
        };
        body.push_str(&format!(
            "<li><a href=\"/sql?preset={}\">{}</a>{}</li>",
            q.number,
            escape(q.title),
            marker
        ));
    }
    body.push_str("</ol>");

    body.push_str("<h2>Tables</h2><p>");
    let links: Vec<String> = view
        .tables
        .iter()
        .map(|t| format!("<a href=\"/sql?tables={0}\">{0}</a>", escape(t)))
        .collect();
    body.push_str(&links.join(" &middot; "));
    body.push_str("</p>");

    body.push_str(&format!(
        "<h2>Query</h2><form method=\"post\" action=\"/sql\">\
         <textarea name=\"sql\" rows=\"8\">{}</textarea><br><button>Run query</button></form>",
        escape(&view.sql)
    ));

    match &view.outcome {
        None => {}
        Some(Err(message)) => body.push_str(&error_box(&format!("Query failed: {}", message))),
        Some(Ok(QueryOutcome::Rows(result))) => body.push_str(&query_result_table(result)),
        Some(Ok(QueryOutcome::Affected { rows })) => {
            body.push_str(&ok_box(&format!("{} rows affected.", rows)))
        }
    }

    layout("SQL Analytics", None, &body)
}

// ---------------------------------------------------------------------------
// Generic table tools
// ---------------------------------------------------------------------------

pub fn tables_page(tables: &[(String, Vec<ColumnInfo>)]) -> String {
    let mut body = String::new();
    for (name, columns) in tables {
        body.push_str(&format!(
            "<h2><a href=\"/tables/{0}\">{0}</a></h2>",
            escape(name)
        ));
        body.push_str(&schema_table(columns));
    }
    layout("Tables", None, &body)
}

fn schema_table(columns: &[ColumnInfo]) -> String {
    let rows: Vec<Vec<String>> = columns
        .iter()
        .map(|c| {
            vec![
                c.name.clone(),
                c.data_type.clone(),
                if c.not_null { "NO" } else { "YES" }.to_string(),
                if c.primary_key { "PRI" } else { "" }.to_string(),
                c.default_value.clone().unwrap_or_default(),
            ]
        })
        .collect();
    table(&strings(&["Column", "Type", "Null", "Key", "Default"]), &rows)
}

/// One table's tool page.
pub struct TableView<'a> {
    pub table: &'a str,
    pub schema: Vec<ColumnInfo>,
    pub limit: u32,
    pub data: Result<(QueryResult, String), String>,
    /// Outcome of an insert/delete/update just run
    pub change: Option<Result<TableChange, String>>,
    /// Outcome of a custom SELECT just run
    pub select: Option<(String, Result<QueryResult, String>)>,
}

pub fn table_page(view: &TableView<'_>) -> String {
    let name = escape(view.table);
    let mut body = String::from("<p><a href=\"/tables\">&larr; All tables</a></p>");

    match &view.change {
        None => {}
        Some(Ok(change)) => {
            body.push_str(&format!("<pre>{}</pre>", escape(&change.sql)));
            body.push_str(&ok_box(&format!("{} row(s) affected.", change.affected)));
        }
        Some(Err(message)) => body.push_str(&error_box(message)),
    }

    body.push_str(&format!(
        "<h2>View data</h2><form method=\"get\" action=\"/tables/{name}\">\
         Rows to load <input name=\"limit\" type=\"number\" min=\"1\" max=\"10000\" value=\"{limit}\"> \
         <button>Load</button></form>",
        name = name,
        limit = view.limit
    ));
    match &view.data {
        Ok((result, sql)) => {
            body.push_str(&format!("<pre>{}</pre>", escape(sql)));
            body.push_str(&query_result_table(result));
        }
        Err(message) => body.push_str(&error_box(&format!("Read failed: {}", message))),
    }

    let select_sql = view.select.as_ref().map(|(sql, _)| sql.as_str()).unwrap_or("");
    body.push_str(&format!(
        "<h2>Run custom SELECT</h2><p><small>Only SELECT queries allowed.</small></p>\
         <form method=\"post\" action=\"/tables/{name}/select\">\
         <textarea name=\"sql\" rows=\"4\">{sql}</textarea><br><button>Run</button></form>",
        name = name,
        sql = escape(select_sql)
    ));
    if let Some((_, outcome)) = &view.select {
        match outcome {
            Ok(result) => body.push_str(&query_result_table(result)),
            Err(message) => body.push_str(&error_box(&format!("Query failed: {}", message))),
        }
    }

    body.push_str(&format!(
        "<h2>Add row</h2><p><small>Leave blank for defaults and auto-increment keys.</small></p>\
         <form method=\"post\" action=\"/tables/{}/insert\">",
        name
    ));
    for c in &view.schema {
        body.push_str(&input(
            &escape(&c.name),
            &format!("{} ({})", c.name, c.data_type),
            "",
        ));
    }
    body.push_str("<button>Insert row</button></form>");

    body.push_str(&format!(
        "<h2>Delete rows</h2><form method=\"post\" action=\"/tables/{name}/delete\">\
         {where_input}<button>Delete</button></form>\
         <h2>Update rows</h2><form method=\"post\" action=\"/tables/{name}/update\">\
         {set_input}{where_input}<button>Run update</button></form>",
        name = name,
        where_input = input("where_clause", "WHERE", ""),
        set_input = input("set_clause", "SET", ""),
    ));

    layout(&format!("Table: {}", view.table), None, &body)
}
