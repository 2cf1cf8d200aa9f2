pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod kv;
pub mod models;
pub mod routes;
pub mod store;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::kv::SqliteKv;
use crate::store::DiaryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: DiaryStore,
}

async fn health() -> &'static str {
    "ok"
}

/// Store backed by the `kv_store` table of an already migrated pool.
pub fn sqlite_store(pool: sqlx::SqlitePool) -> DiaryStore {
    DiaryStore::new(Arc::new(SqliteKv::new(pool)))
}

/// Build the full Axum application router around `store`.
pub fn build_app(store: DiaryStore) -> Router {
    let state = AppState { store };

    Router::new()
        .route("/health", get(health))
        .merge(routes::moods::router())
        .merge(routes::diary::router())
        .merge(routes::profile::router())
        .merge(routes::export::router())
        .layer(
            TraceLayer::new_for_http()
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
