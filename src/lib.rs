// src/lib.rs
// Public library surface for the service binary, the demo and integration tests.

pub mod api;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod format;
pub mod logs;
pub mod metrics;
pub mod render;
pub mod scheduler;
pub mod simulator;
pub mod smoother;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, router, AppState};
pub use crate::config::DashboardConfig;
pub use crate::dashboard::Dashboard;
pub use crate::display::{DisplaySurface, MemorySurface, Slot};
pub use crate::error::MonitorError;
pub use crate::scheduler::{spawn_dashboard_loop, SharedDashboard};

use std::sync::Arc;
use tracing::info;

/// Everything the service needs, wired but not yet ticking.
pub struct App {
    pub router: axum::Router,
    pub dashboard: SharedDashboard<MemorySurface>,
    pub surface: MemorySurface,
}

/// Build the started dashboard and its router. Call [`spawn_dashboard_loop`]
/// on `app.dashboard` to begin periodic refreshes.
pub fn build_app(cfg: DashboardConfig) -> anyhow::Result<App> {
    // recorder first, so the startup paint is already counted
    let metrics = crate::metrics::Metrics::init()?;

    let surface = MemorySurface::new();
    let mut dashboard = Dashboard::new(cfg, surface.clone());
    dashboard.start();
    let dashboard = Arc::new(parking_lot::Mutex::new(dashboard));

    let state = AppState {
        dashboard: dashboard.clone(),
        surface: surface.clone(),
    };
    let router = create_router(state, Some(&metrics));
    info!("dashboard app built");

    Ok(App {
        router,
        dashboard,
        surface,
    })
}
