//! Runs the dashboard headless on a virtual clock and prints the text slots once per
//! simulated second. Nothing sleeps, so a long run finishes immediately.
//!
//! `cargo run --bin tick-demo -- 8` simulates eight seconds. Set `MONITOR_LOG_JSON=1`
//! for JSON log lines.

use std::time::Duration;

use etl_pipeline_monitor::{Dashboard, DashboardConfig, MemorySurface, Slot};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const TEXT_SLOTS: [Slot; 9] = [
    Slot::LastUpdate,
    Slot::RecordsProcessed,
    Slot::Throughput,
    Slot::AvgLatency,
    Slot::SuccessRate,
    Slot::JobCount,
    Slot::FlowRate1,
    Slot::FlowRate2,
    Slot::FlowRate3,
];

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MONITOR_LOG")
        .unwrap_or_else(|_| EnvFilter::new("etl_pipeline_monitor=info"));
    if std::env::var("MONITOR_LOG_JSON").ok().as_deref() == Some("1") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}

fn slot_line(surface: &MemorySurface) -> String {
    TEXT_SLOTS
        .iter()
        .map(|s| format!("{}={}", s, surface.text(*s).unwrap_or_else(|| "-".into())))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Step `dashboard` frame by frame for `secs` virtual seconds, collecting one slot
/// line at the end of each second.
fn drive(dashboard: &mut Dashboard<MemorySurface>, secs: u64, frame: Duration) -> Vec<String> {
    let frame = frame.max(Duration::from_millis(1));
    let mut lines = Vec::with_capacity(secs as usize);
    let mut now = dashboard.now();
    for second in 1..=secs {
        let mark = Duration::from_secs(second);
        while now < mark {
            now = (now + frame).min(mark);
            dashboard.advance(now);
        }
        lines.push(slot_line(dashboard.surface()));
    }
    lines
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let secs: u64 = std::env::args()
        .nth(1)
        .and_then(|a| a.parse().ok())
        .unwrap_or(6);

    let cfg = DashboardConfig::load_default()?;
    let frame = cfg.frame_interval();
    let mut dashboard = Dashboard::new(cfg, MemorySurface::new());
    dashboard.start();

    for line in drive(&mut dashboard, secs, frame) {
        println!("{line}");
    }

    println!("tick-demo done ({} log records)", dashboard.feed().len());
    Ok(())
}
