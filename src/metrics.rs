use anyhow::Context;
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series show up on /metrics).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(describe_all);
}

fn describe_all() {
    describe_counter!(
        "monitor_task_runs_total",
        "Scheduled dashboard task executions, by task."
    );
    describe_counter!(
        "monitor_log_records_total",
        "Synthetic log records appended by the log task."
    );
    describe_counter!("monitor_logs_cleared_total", "Log feed clear actions.");
    describe_counter!(
        "monitor_slot_write_misses_total",
        "Writes skipped because the display slot was missing."
    );
    describe_counter!(
        "monitor_filter_changes_total",
        "Source filter selections, by filter."
    );
    describe_gauge!(
        "monitor_last_tick_ms",
        "Scheduler clock (ms since start) at the last frame tick."
    );
}

#[derive(Clone)]
pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder. Safe to call repeatedly; every call
    /// after the first returns the already-installed handle.
    pub fn init() -> anyhow::Result<Self> {
        static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();
        let handle = HANDLE
            .get_or_try_init(|| {
                PrometheusBuilder::new()
                    .install_recorder()
                    .context("prometheus: install recorder")
            })?
            .clone();
        // describe again: anything described before the recorder existed was dropped
        describe_all();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
