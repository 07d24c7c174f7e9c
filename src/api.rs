use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::catalog::{DataSource, Job, SourceFilter};
use crate::display::{MemorySurface, Slot, SlotContent, SurfaceSnapshot};
use crate::error::MonitorError;
use crate::logs::LogRecord;
use crate::metrics::Metrics;
use crate::scheduler::SharedDashboard;

pub const STATIC_DIR: &str = "static";

#[derive(Clone)]
pub struct AppState {
    pub dashboard: SharedDashboard<MemorySurface>,
    pub surface: MemorySurface,
}

impl IntoResponse for MonitorError {
    fn into_response(self) -> Response {
        let status = match self {
            MonitorError::UnknownFilter(_) => StatusCode::BAD_REQUEST,
            MonitorError::UnknownSlot(_) => StatusCode::NOT_FOUND,
            MonitorError::EmptyCatalog => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

/// JSON API only (no static files, no /metrics).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/slots", get(slots))
        .route("/api/slots/{id}", get(slot))
        .route("/api/filter", post(select_filter))
        .route("/api/logs/clear", post(clear_logs))
        .route("/debug/jobs", get(debug_jobs))
        .route("/debug/logs", get(debug_logs))
        .route("/debug/sources", get(debug_sources))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Full service: API, `/metrics` when a recorder is installed, and the page shell.
pub fn create_router(state: AppState, metrics: Option<&Metrics>) -> Router {
    let mut app = router(state);
    if let Some(m) = metrics {
        app = app.merge(m.router());
    }
    app.fallback_service(ServeDir::new(STATIC_DIR))
}

async fn slots(State(state): State<AppState>) -> Json<SurfaceSnapshot> {
    Json(state.surface.snapshot())
}

async fn slot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<SlotContent>>, MonitorError> {
    let slot: Slot = id.parse()?;
    Ok(Json(state.surface.get(slot)))
}

#[derive(serde::Deserialize)]
struct FilterReq {
    filter: String,
}

#[derive(serde::Serialize)]
struct FilterResp {
    active_filter: SourceFilter,
    visible_sources: usize,
}

async fn select_filter(
    State(state): State<AppState>,
    Json(body): Json<FilterReq>,
) -> Result<Json<FilterResp>, MonitorError> {
    let filter: SourceFilter = body.filter.parse()?;
    let mut d = state.dashboard.lock();
    d.select_filter(filter);
    Ok(Json(FilterResp {
        active_filter: d.active_filter(),
        visible_sources: d.catalog().filtered_sources(filter).len(),
    }))
}

async fn clear_logs(State(state): State<AppState>) -> StatusCode {
    state.dashboard.lock().clear_logs();
    StatusCode::NO_CONTENT
}

async fn debug_jobs(State(state): State<AppState>) -> Json<Vec<Job>> {
    Json(state.dashboard.lock().catalog().jobs().to_vec())
}

async fn debug_logs(State(state): State<AppState>) -> Json<Vec<LogRecord>> {
    Json(state.dashboard.lock().feed().snapshot())
}

/// Sources under `?filter=` if given, else under the active filter.
async fn debug_sources(
    State(state): State<AppState>,
    Query(q): Query<HashMap<String, String>>,
) -> Result<Json<Vec<DataSource>>, MonitorError> {
    let d = state.dashboard.lock();
    let filter = match q.get("filter") {
        Some(f) => f.parse()?,
        None => d.active_filter(),
    };
    let rows = d
        .catalog()
        .filtered_sources(filter)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(rows))
}
