//! ETL Pipeline Monitor: binary entrypoint.
//! Boots the simulated dashboard, starts its refresh loop, and serves it over Axum.

use etl_pipeline_monitor::{build_app, spawn_dashboard_loop, DashboardConfig};
use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compact tracing, filtered by `MONITOR_LOG` (falls back to info for this crate).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("MONITOR_LOG")
        .unwrap_or_else(|_| EnvFilter::new("etl_pipeline_monitor=info,warn"));

    // Shuttle may already have installed a subscriber; keep theirs if so.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = DashboardConfig::load_default()?;
    let frame = cfg.frame_interval();
    let app = build_app(cfg)?;

    spawn_dashboard_loop(app.dashboard.clone(), frame);
    tracing::info!(frame_ms = frame.as_millis() as u64, "dashboard loop running");

    Ok(app.router.into())
}
