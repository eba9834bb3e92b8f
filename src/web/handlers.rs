use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{error, info, warn};

use super::{
    error::WebError,
    forms::{
        BattingForm, BowlingForm, MatchForm, MemberAction, PlayerForm, SqlForm, SquadForm,
        SquadMemberForm, UpdateForm, WhereForm,
    },
    render::{self, CrudView, LiveView, PlayerDetail, SqlView, TableView},
    AppState, SharedState,
};
use crate::{
    commands::{
        common::{mirror_matches, mirror_scorecard},
        live_matches::filter_series,
    },
    error::LiveStatsError,
    provider::profile_to_player,
    storage::{
        playground::DEFAULT_TABLE_LIMIT, preset, CricketDatabase, TableChange, PRESET_QUERIES,
    },
    MatchId, PlayerId, StatKind,
};

type Page = Result<Html<String>, WebError>;

fn not_found(entity: &str, id: i64) -> LiveStatsError {
    LiveStatsError::query(format!("{} {} not found.", entity, id))
}

/// # GET /
pub async fn home(State(state): State<SharedState>) -> Page {
    let db = state.db();
    let mut counts = Vec::new();
    for table in db.list_tables()? {
        let n = db.count_rows(&table)?;
        counts.push((table, n));
    }
    Ok(Html(render::home_page(&state.config, &counts)))
}

// ---------------------------------------------------------------------------
// Live data
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LiveParams {
    pub series: Option<String>,
}

/// # GET /live
/// Fetches on every request; the page's meta refresh drives the polling.
pub async fn live_matches(
    State(state): State<SharedState>,
    Query(params): Query<LiveParams>,
) -> Page {
    let fetched = state.client.live_matches().await;

    let (fetched, stored, store_error) = {
        let mut db = state.db();
        match fetched {
            Ok(records) => {
                let store_error = mirror_matches(&mut db, &records).err().map(|e| {
                    error!(error = %e, "Mirroring live matches failed.");
                    e.to_string()
                });
                let records = filter_series(records, params.series.as_deref());
                (Ok(records), Vec::new(), store_error)
            }
            Err(e) => {
                warn!(error = %e, "Live matches unavailable.");
                (Err(e.to_string()), db.list_matches()?, None)
            }
        }
    };

    let view = LiveView {
        series: params.series.as_deref(),
        fetched,
        stored,
        store_error,
        refresh_secs: state.config.refresh_interval_secs,
    };
    Ok(Html(render::live_page(&view)))
}

/// # GET /live/:match_id/scorecard
pub async fn scorecard(State(state): State<SharedState>, Path(match_id): Path<i64>) -> Page {
    let match_id = MatchId::new(match_id);
    let card = state.client.scorecard(match_id).await;

    let store_error = match &card {
        Ok(card) => {
            let mut db = state.db();
            mirror_scorecard(&mut db, match_id, card).err().map(|e| {
                error!(%match_id, error = %e, "Mirroring scorecard failed.");
                e.to_string()
            })
        }
        Err(_) => None,
    };

    let card = card.map_err(|e| {
        warn!(%match_id, error = %e, "Scorecard unavailable.");
        e.to_string()
    });
    Ok(Html(render::scorecard_page(
        match_id,
        &card,
        store_error.as_deref(),
    )))
}

#[derive(Debug, Deserialize)]
pub struct PlayerParams {
    pub name: Option<String>,
    pub player_id: Option<String>,
}

/// # GET /players
pub async fn players(
    State(state): State<SharedState>,
    Query(params): Query<PlayerParams>,
) -> Page {
    let name = params.name.unwrap_or_default();
    let mut notice = None;

    let player_id = match params.player_id.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => match raw.parse::<PlayerId>() {
            Ok(id) => Some(id),
            Err(e) => {
                notice = Some(e.to_string());
                None
            }
        },
        _ => None,
    };

    let results = if name.trim().is_empty() {
        None
    } else {
        Some(
            state
                .client
                .search_players(&name)
                .await
                .map_err(|e| e.to_string()),
        )
    };

    let detail = match player_id {
        None => None,
        Some(id) => {
            let profile = state.client.player_profile(id).await;
            if let Some(player) = profile.as_ref().ok().and_then(profile_to_player) {
                let mut db = state.db();
                if let Err(e) = db.upsert_player(&player) {
                    error!(player_id = %id, error = %e, "Saving player failed.");
                }
            }
            Some(PlayerDetail {
                profile: profile.map_err(|e| e.to_string()),
                career: state.client.player_career(id).await.map_err(|e| e.to_string()),
                batting: state
                    .client
                    .player_stats(id, StatKind::Batting)
                    .await
                    .map_err(|e| e.to_string()),
                bowling: state
                    .client
                    .player_stats(id, StatKind::Bowling)
                    .await
                    .map_err(|e| e.to_string()),
            })
        }
    };

    Ok(Html(render::players_page(
        &name,
        results.as_ref(),
        detail.as_ref(),
        notice.as_deref(),
    )))
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

fn load_crud_view(db: &CricketDatabase) -> crate::Result<CrudView> {
    let mut squads = Vec::new();
    for squad in db.list_squads()? {
        let members = db.squad_members(squad.squad_id)?;
        squads.push((squad, members));
    }
    Ok(CrudView {
        matches: db.list_matches()?,
        players: db.list_players()?,
        squads,
        batting: db.list_batting_stats()?,
        bowling: db.list_bowling_stats()?,
    })
}

/// Run one write and redirect back to `/crud`, or re-render with the error text.
fn crud_write<F>(state: &AppState, action: &str, op: F) -> Result<Response, WebError>
where
    F: FnOnce(&mut CricketDatabase) -> crate::Result<()>,
{
    let mut db = state.db();
    match op(&mut *db) {
        Ok(()) => {
            info!(action, "CRUD write applied.");
            Ok(Redirect::to("/crud").into_response())
        }
        Err(e) => {
            error!(action, error = %e, "CRUD write failed.");
            let view = load_crud_view(&db)?;
            let message = format!("{} failed: {}", action, e);
            Ok((
                StatusCode::BAD_REQUEST,
                Html(render::crud_page(&view, Some(&message))),
            )
                .into_response())
        }
    }
}

/// # GET /crud
pub async fn crud_page(State(state): State<SharedState>) -> Page {
    let db = state.db();
    let view = load_crud_view(&db)?;
    Ok(Html(render::crud_page(&view, None)))
}

pub async fn create_match(
    State(state): State<SharedState>,
    Form(form): Form<MatchForm>,
) -> Result<Response, WebError> {
    crud_write(&state, "Create match", |db| db.insert_match(&form.into_match(None)?))
}

pub async fn update_match(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Form(form): Form<MatchForm>,
) -> Result<Response, WebError> {
    crud_write(&state, "Update match", |db| {
        let m = form.into_match(Some(MatchId::new(id)))?;
        if db.update_match(&m)? {
            Ok(())
        } else {
            Err(not_found("Match", id))
        }
    })
}

pub async fn delete_match(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    crud_write(&state, "Delete match", |db| {
        if db.delete_match(MatchId::new(id))? {
            Ok(())
        } else {
            Err(not_found("Match", id))
        }
    })
}

pub async fn create_player(
    State(state): State<SharedState>,
    Form(form): Form<PlayerForm>,
) -> Result<Response, WebError> {
    crud_write(&state, "Create player", |db| {
        db.insert_player(&form.into_player(None)?)
    })
}

pub async fn update_player(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Form(form): Form<PlayerForm>,
) -> Result<Response, WebError> {
    crud_write(&state, "Update player", |db| {
        let p = form.into_player(Some(PlayerId::new(id)))?;
        if db.update_player(&p)? {
            Ok(())
        } else {
            Err(not_found("Player", id))
        }
    })
}

pub async fn delete_player(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    crud_write(&state, "Delete player", |db| {
        if db.delete_player(PlayerId::new(id))? {
            Ok(())
        } else {
            Err(not_found("Player", id))
        }
    })
}

pub async fn create_squad(
    State(state): State<SharedState>,
    Form(form): Form<SquadForm>,
) -> Result<Response, WebError> {
    crud_write(&state, "Create squad", |db| {
        let (team, series) = form.parts()?;
        db.create_squad(&team, &series).map(|_| ())
    })
}

pub async fn squad_member(
    State(state): State<SharedState>,
    Path(squad_id): Path<i64>,
    Form(form): Form<SquadMemberForm>,
) -> Result<Response, WebError> {
    crud_write(&state, "Update squad", |db| {
        let player_id = form.player_id()?;
        match form.action {
            MemberAction::Add => db.add_squad_member(squad_id, player_id).map(|_| ()),
            MemberAction::Remove => {
                if db.remove_squad_member(squad_id, player_id)? {
                    Ok(())
                } else {
                    Err(not_found("Squad member", player_id.as_i64()))
                }
            }
        }
    })
}

pub async fn delete_squad(
    State(state): State<SharedState>,
    Path(squad_id): Path<i64>,
) -> Result<Response, WebError> {
    crud_write(&state, "Delete squad", |db| {
        if db.delete_squad(squad_id)? {
            Ok(())
        } else {
            Err(not_found("Squad", squad_id))
        }
    })
}

pub async fn create_batting(
    State(state): State<SharedState>,
    Form(form): Form<BattingForm>,
) -> Result<Response, WebError> {
    crud_write(&state, "Add batting row", |db| {
        db.insert_batting_stat(&form.into_stat()?).map(|_| ())
    })
}

pub async fn delete_batting(
    State(state): State<SharedState>,
    Path(stat_id): Path<i64>,
) -> Result<Response, WebError> {
    crud_write(&state, "Delete batting row", |db| {
        if db.delete_batting_stat(stat_id)? {
            Ok(())
        } else {
            Err(not_found("Batting row", stat_id))
        }
    })
}

pub async fn create_bowling(
    State(state): State<SharedState>,
    Form(form): Form<BowlingForm>,
) -> Result<Response, WebError> {
    crud_write(&state, "Add bowling row", |db| {
        db.insert_bowling_stat(&form.into_stat()?).map(|_| ())
    })
}

pub async fn delete_bowling(
    State(state): State<SharedState>,
    Path(stat_id): Path<i64>,
) -> Result<Response, WebError> {
    crud_write(&state, "Delete bowling row", |db| {
        if db.delete_bowling_stat(stat_id)? {
            Ok(())
        } else {
            Err(not_found("Bowling row", stat_id))
        }
    })
}

// ---------------------------------------------------------------------------
// SQL playground
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SqlParams {
    pub preset: Option<usize>,
    /// Comma-separated table names used to suggest a starter query
    pub tables: Option<String>,
}

/// # GET /sql
pub async fn sql_page(State(state): State<SharedState>, Query(params): Query<SqlParams>) -> Page {
    let db = state.db();
    let tables = db.list_tables()?;

    let (sql, outcome, selected) = match params.preset.and_then(preset) {
        Some(q) => (
            q.sql.to_string(),
            Some(db.run_query(q.sql).map_err(|e| e.to_string())),
            Some(q.number),
        ),
        None => {
            let selected: Vec<String> = params
                .tables
                .unwrap_or_default()
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
            (db.suggest_query(&selected)?, None, None)
        }
    };

    Ok(Html(render::sql_page(&SqlView {
        presets: PRESET_QUERIES,
        selected_preset: selected,
        tables,
        sql,
        outcome,
    })))
}

/// # POST /sql
pub async fn run_sql(State(state): State<SharedState>, Form(form): Form<SqlForm>) -> Page {
    let db = state.db();
    let tables = db.list_tables()?;
    let outcome = db.run_query(&form.sql).map_err(|e| {
        warn!(error = %e, "Playground query failed.");
        e.to_string()
    });

    Ok(Html(render::sql_page(&SqlView {
        presets: PRESET_QUERIES,
        selected_preset: None,
        tables,
        sql: form.sql,
        outcome: Some(outcome),
    })))
}

// ---------------------------------------------------------------------------
// Generic table tools
// ---------------------------------------------------------------------------

/// # GET /tables
pub async fn tables(State(state): State<SharedState>) -> Page {
    let db = state.db();
    let mut listing = Vec::new();
    for table in db.list_tables()? {
        let schema = db.table_schema(&table)?;
        listing.push((table, schema));
    }
    Ok(Html(render::tables_page(&listing)))
}

#[derive(Debug, Deserialize)]
pub struct TableParams {
    pub limit: Option<u32>,
}

fn table_view<'a>(db: &CricketDatabase, table: &'a str, limit: u32) -> Result<TableView<'a>, WebError> {
    let schema = match db.table_schema(table) {
        Ok(schema) => schema,
        Err(LiveStatsError::InvalidTable { table }) => {
            return Err(WebError::NotFound(format!("table {}", table)))
        }
        Err(e) => return Err(e.into()),
    };
    Ok(TableView {
        table,
        schema,
        limit,
        data: db.fetch_table(table, limit).map_err(|e| e.to_string()),
        change: None,
        select: None,
    })
}

/// # GET /tables/:table
pub async fn table_data(
    State(state): State<SharedState>,
    Path(table): Path<String>,
    Query(params): Query<TableParams>,
) -> Page {
    let db = state.db();
    let view = table_view(&db, &table, params.limit.unwrap_or(DEFAULT_TABLE_LIMIT))?;
    Ok(Html(render::table_page(&view)))
}

/// Apply one generic table change, then render the table with its outcome.
fn table_change<F>(state: &AppState, table: &str, action: &str, op: F) -> Result<Response, WebError>
where
    F: FnOnce(&mut CricketDatabase) -> crate::Result<TableChange>,
{
    let mut db = state.db();
    // Unknown tables are a 404 before anything runs
    table_view(&db, table, DEFAULT_TABLE_LIMIT)?;

    let change = op(&mut *db);
    let status = match &change {
        Ok(c) => {
            info!(table, action, affected = c.affected, "Table change applied.");
            StatusCode::OK
        }
        Err(e) => {
            error!(table, action, error = %e, "Table change failed.");
            StatusCode::BAD_REQUEST
        }
    };

    let mut view = table_view(&db, table, DEFAULT_TABLE_LIMIT)?;
    view.change = Some(change.map_err(|e| format!("{} failed: {}", action, e)));
    Ok((status, Html(render::table_page(&view))).into_response())
}

/// # POST /tables/:table/insert
pub async fn table_insert(
    State(state): State<SharedState>,
    Path(table): Path<String>,
    Form(values): Form<Vec<(String, String)>>,
) -> Result<Response, WebError> {
    table_change(&state, &table, "Insert", |db| db.insert_row(&table, &values))
}

/// # POST /tables/:table/delete
pub async fn table_delete(
    State(state): State<SharedState>,
    Path(table): Path<String>,
    Form(form): Form<WhereForm>,
) -> Result<Response, WebError> {
    table_change(&state, &table, "Delete", |db| {
        db.delete_rows(&table, &form.where_clause)
    })
}

/// # POST /tables/:table/update
pub async fn table_update(
    State(state): State<SharedState>,
    Path(table): Path<String>,
    Form(form): Form<UpdateForm>,
) -> Result<Response, WebError> {
    table_change(&state, &table, "Update", |db| {
        db.update_rows(&table, &form.set_clause, &form.where_clause)
    })
}

/// # POST /tables/:table/select
pub async fn table_select(
    State(state): State<SharedState>,
    Path(table): Path<String>,
    Form(form): Form<SqlForm>,
) -> Page {
    let db = state.db();
    let mut view = table_view(&db, &table, DEFAULT_TABLE_LIMIT)?;
    let result = db.run_select(&form.sql).map_err(|e| e.to_string());
    view.select = Some((form.sql, result));
    Ok(Html(render::table_page(&view)))
}
