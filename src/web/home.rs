use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Serialize;
use tracing::warn;

use super::views;
use super::AppState;
use crate::types::Result;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/health", get(health))
}

async fn dashboard(State(state): State<AppState>) -> Result<Html<String>> {
    let summary = state.billings().summary().await?;
    Ok(Html(views::dashboard(&summary)))
}

#[derive(Debug, Serialize)]
struct Health {
    status:   &'static str,
    backend:  &'static str,
    database: bool,
}

/// Liveness probe. Always answers 200; `database` tells if the backend responds to a ping.
async fn health(State(state): State<AppState>) -> Json<Health> {
    let driver = state.driver();
    let database = match driver.connection().ping().await {
        Ok(()) => true,
        Err(err) => {
            warn!("{} is not reachable: {err}", driver.name());
            false
        }
    };

    Json(Health {
        status: "ok",
        backend: driver.name(),
        database,
    })
}
