//! Dashboard server hosting the flaky tests view
//!
//! `GET /projects/:project/flaky_tests/?date=` renders the page,
//! `GET /api/projects/:project/flaky_tests/?date=` returns the prepared
//! view as JSON.

use axum::{
    extract::{Path, Query, State},
    response::{Html, Json},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::DashboardResult;
use crate::render::render_page;
use crate::state::ProjectFlakyTestsState;
use crate::view::FlakyTestsView;

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    flaky_tests: Arc<ProjectFlakyTestsState>,
}

/// Query parameters of the flaky tests view
#[derive(Debug, Deserialize)]
struct ViewQuery {
    date: Option<String>,
}

pub fn router(flaky_tests: Arc<ProjectFlakyTestsState>) -> Router {
    let state = AppState { flaky_tests };

    Router::new()
        .route("/api/health", get(health_check))
        .route("/projects/:project/flaky_tests/", get(flaky_tests_page))
        .route("/api/projects/:project/flaky_tests/", get(flaky_tests_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(bind: SocketAddr, flaky_tests: Arc<ProjectFlakyTestsState>) -> DashboardResult<()> {
    let listener = TcpListener::bind(bind).await?;
    info!("Dashboard listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(flaky_tests)).await?;
    Ok(())
}

async fn health_check() -> &'static str {
    "ok"
}

async fn flaky_tests_page(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Query(query): Query<ViewQuery>,
) -> DashboardResult<Html<String>> {
    let activation = state
        .flaky_tests
        .activate(&project, query.date.as_deref())
        .await?;
    Ok(Html(render_page(&activation)?))
}

async fn flaky_tests_json(
    State(state): State<AppState>,
    Path(project): Path<String>,
    Query(query): Query<ViewQuery>,
) -> DashboardResult<Json<FlakyTestsView>> {
    let activation = state
        .flaky_tests
        .activate(&project, query.date.as_deref())
        .await?;
    Ok(Json(activation.view))
}
