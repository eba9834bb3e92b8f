//! Browser dashboard.
//!
//! One axum router serves every page. Handlers lock the database only for
//! the synchronous part of a request; provider calls happen with no lock held.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    core::AppConfig,
    provider::CricbuzzClient,
    storage::CricketDatabase,
    Result,
};

pub mod error;
pub mod forms;
pub mod handlers;
pub mod render;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub db: Mutex<CricketDatabase>,
    pub client: CricbuzzClient,
    pub config: AppConfig,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(db: CricketDatabase, config: AppConfig) -> Result<Self> {
        let client = CricbuzzClient::from_config(&config)?;
        Ok(Self {
            db: Mutex::new(db),
            client,
            config,
        })
    }

    /// Lock the database. Never hold the guard across an `.await`.
    ///
    /// A poisoned lock is recovered; the connection stays usable after a
    /// request panics.
    pub fn db(&self) -> MutexGuard<'_, CricketDatabase> {
        self.db.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Recovering database lock after a panicked request.");
            self.db.clear_poison();
            poisoned.into_inner()
        })
    }
}

/// Build the application router.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/", get(handlers::home))
        .route("/live", get(handlers::live_matches))
        .route("/live/:match_id/scorecard", get(handlers::scorecard))
        .route("/players", get(handlers::players))
        .route("/crud", get(handlers::crud_page))
        .route("/crud/matches", post(handlers::create_match))
        .route("/crud/matches/:id/update", post(handlers::update_match))
        .route("/crud/matches/:id/delete", post(handlers::delete_match))
        .route("/crud/players", post(handlers::create_player))
        .route("/crud/players/:id/update", post(handlers::update_player))
        .route("/crud/players/:id/delete", post(handlers::delete_player))
        .route("/crud/squads", post(handlers::create_squad))
        .route("/crud/squads/:id/members", post(handlers::squad_member))
        .route("/crud/squads/:id/delete", post(handlers::delete_squad))
        .route("/crud/batting", post(handlers::create_batting))
        .route("/crud/batting/:id/delete", post(handlers::delete_batting))
        .route("/crud/bowling", post(handlers::create_bowling))
        .route("/crud/bowling/:id/delete", post(handlers::delete_bowling))
        .route("/sql", get(handlers::sql_page).post(handlers::run_sql))
        .route("/tables", get(handlers::tables))
        .route("/tables/:table", get(handlers::table_data))
        .route("/tables/:table/select", post(handlers::table_select))
        .route("/tables/:table/insert", post(handlers::table_insert))
        .route("/tables/:table/delete", post(handlers::table_delete))
        .route("/tables/:table/update", post(handlers::table_update))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Open the store, then serve the dashboard until the process is stopped.
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let db = CricketDatabase::open(&config.database_path)?;
    let addr = config.bind_addr;
    let state = Arc::new(AppState::new(db, config)?);

    if state.config.api_key.is_none() {
        tracing::warn!("No API key configured; live pages will show data unavailable.");
    }

    let app = router(state);

    tracing::info!("Dashboard listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
