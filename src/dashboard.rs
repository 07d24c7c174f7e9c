//! # Dashboard
//!
//! The render scheduler's state object. It owns everything that changes over
//! time (catalog job progress, the log feed, the active source filter, counter
//! animations, the RNG and the task schedule) and paints into a
//! [`DisplaySurface`].
//!
//! Lifecycle:
//! 1. [`Dashboard::start`] paints metrics, clock, jobs and the unfiltered
//!    source table once, then seeds the log feed.
//! 2. [`Dashboard::advance`] is called with a monotonically increasing offset
//!    from start; it runs every task that came due and then paints one
//!    animation frame.
//! 3. [`Dashboard::select_filter`] and [`Dashboard::clear_logs`] are the
//!    interaction entry points.
//!
//! Slot writes that the surface refuses are skipped and counted; a broken view
//! never stops a task.

use metrics::counter;
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info};

use crate::catalog::{Catalog, SourceFilter};
use crate::config::DashboardConfig;
use crate::display::{DisplaySurface, Slot};
use crate::format::{format_clock_time, format_magnitude};
use crate::logs::{generate_log_record, LogFeed};
use crate::metrics::ensure_metrics_described;
use crate::render;
use crate::scheduler::{TaskKind, TaskSchedule};
use crate::simulator::{format_flow_rate, sample_flow_rates, simulate_metrics};
use crate::smoother::Animations;

pub struct Dashboard<S> {
    cfg: DashboardConfig,
    catalog: Catalog,
    feed: LogFeed,
    filter: SourceFilter,
    animations: Animations,
    schedule: TaskSchedule,
    rng: StdRng,
    surface: S,
}

impl<S: DisplaySurface> Dashboard<S> {
    /// Dashboard over the built-in catalog, seeded from `cfg.rng_seed` or OS entropy.
    pub fn new(cfg: DashboardConfig, surface: S) -> Self {
        let rng = match cfg.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_parts(cfg, Catalog::default_seed(), surface, rng)
    }

    pub fn with_parts(cfg: DashboardConfig, catalog: Catalog, surface: S, rng: StdRng) -> Self {
        ensure_metrics_described();
        let cfg = cfg.sanitized();
        Self {
            feed: LogFeed::with_capacity(cfg.log_capacity),
            animations: Animations::new(cfg.animation()),
            schedule: TaskSchedule::new(&cfg.periods),
            filter: SourceFilter::All,
            catalog,
            rng,
            surface,
            cfg,
        }
    }

    /// Initial synchronous paint plus the seed log records.
    pub fn start(&mut self) {
        let now = self.schedule.now();
        self.refresh_metrics(now);
        self.refresh_clock();
        self.refresh_jobs();
        self.surface.activate_filter(self.filter);
        self.refresh_sources();

        for _ in 0..self.cfg.initial_logs {
            let rec = generate_log_record(&mut self.rng, &self.catalog);
            self.feed.push(rec);
        }
        self.paint_logs();
        self.paint_frame(now);

        info!(
            target: "scheduler",
            sources = self.catalog.sources().len(),
            jobs = self.catalog.jobs().len(),
            logs = self.feed.len(),
            "dashboard started"
        );
    }

    /// Run every task due by `now`, then paint one animation frame at `now`.
    pub fn advance(&mut self, now: Duration) {
        for (at, kind) in self.schedule.advance_to(now) {
            self.run_task_at(kind, at);
        }
        self.paint_frame(now);
    }

    fn run_task_at(&mut self, kind: TaskKind, at: Duration) {
        debug!(target: "scheduler", task = %kind, at_ms = at.as_millis() as u64, "task tick");
        counter!("monitor_task_runs_total", "task" => kind.as_str()).increment(1);
        match kind {
            TaskKind::Clock => self.refresh_clock(),
            TaskKind::Metrics => self.refresh_metrics(at),
            TaskKind::Jobs => self.refresh_jobs(),
            TaskKind::Logs => self.append_log(),
            TaskKind::FlowRates => self.refresh_flow_rates(),
            TaskKind::Sources => self.refresh_sources(),
        }
    }

    /// Filter-control click: mark it active and re-render the source table.
    pub fn select_filter(&mut self, filter: SourceFilter) {
        info!(target: "dashboard", filter = %filter, "filter selected");
        counter!("monitor_filter_changes_total", "filter" => filter.as_str()).increment(1);
        self.filter = filter;
        self.surface.activate_filter(filter);
        self.refresh_sources();
    }

    /// Truncate the log feed and repaint it empty.
    pub fn clear_logs(&mut self) {
        info!(target: "dashboard", dropped = self.feed.len(), "log feed cleared");
        counter!("monitor_logs_cleared_total").increment(1);
        self.feed.clear();
        self.paint_logs();
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn feed(&self) -> &LogFeed {
        &self.feed
    }

    pub fn active_filter(&self) -> SourceFilter {
        self.filter
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn now(&self) -> Duration {
        self.schedule.now()
    }

    pub fn is_animating(&self, slot: Slot) -> bool {
        self.animations.is_animating(slot)
    }

    // --- task bodies ---

    fn refresh_clock(&mut self) {
        let text = format!("Updated: {}", format_clock_time());
        self.put_text(Slot::LastUpdate, text);
    }

    fn refresh_metrics(&mut self, at: Duration) {
        let m = simulate_metrics(&mut self.rng);
        self.animations
            .start(Slot::RecordsProcessed, m.records_processed as i64, at);
        self.put_text(Slot::Throughput, format_magnitude(m.throughput_per_second));
        self.put_text(Slot::AvgLatency, m.latency_text());
        self.put_text(Slot::SuccessRate, m.success_rate_text());
    }

    fn refresh_jobs(&mut self) {
        self.catalog.advance_jobs(&mut self.rng);
        let jobs = self.catalog.jobs();
        let count = render::job_count_text(jobs);
        let html = render::render_jobs(jobs);
        self.put_text(Slot::JobCount, count);
        self.put_html(Slot::JobsList, html);
    }

    fn append_log(&mut self) {
        let rec = generate_log_record(&mut self.rng, &self.catalog);
        debug!(target: "dashboard", level = %rec.level, msg = %rec.message, "log appended");
        counter!("monitor_log_records_total").increment(1);
        self.feed.push(rec);
        self.paint_logs();
    }

    fn refresh_flow_rates(&mut self) {
        let rates = sample_flow_rates(&mut self.rng);
        for (slot, rate) in Slot::FLOW_RATES.into_iter().zip(rates) {
            self.put_text(slot, format_flow_rate(rate));
        }
    }

    fn refresh_sources(&mut self) {
        let visible = self.catalog.filtered_sources(self.filter);
        let html = render::render_sources(visible, &mut self.rng);
        self.put_html(Slot::SourcesBody, html);
    }

    // --- painting ---

    fn paint_logs(&mut self) {
        let html = render::render_logs(self.feed.iter());
        self.put_html(Slot::LogsContainer, html);
    }

    fn paint_frame(&mut self, now: Duration) {
        for (slot, value) in self.animations.frame(now) {
            self.put_text(slot, format_magnitude(value.max(0) as u64));
        }
    }

    fn put_text(&self, slot: Slot, text: String) {
        let ok = self.surface.set_text(slot, text);
        self.note_write(slot, ok);
    }

    fn put_html(&self, slot: Slot, html: String) {
        let ok = self.surface.set_html(slot, html);
        self.note_write(slot, ok);
    }

    fn note_write(&self, slot: Slot, ok: bool) {
        if !ok {
            debug!(target: "display", slot = %slot, "slot missing; write skipped");
            counter!("monitor_slot_write_misses_total", "slot" => slot.id()).increment(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::MemorySurface;

    fn seeded() -> Dashboard<MemorySurface> {
        let cfg = DashboardConfig {
            rng_seed: Some(5),
            ..DashboardConfig::default()
        };
        Dashboard::new(cfg, MemorySurface::new())
    }

    #[test]
    fn start_paints_everything_but_flow_rates() {
        let mut d = seeded();
        d.start();
        let s = d.surface();
        for slot in [
            Slot::RecordsProcessed,
            Slot::Throughput,
            Slot::AvgLatency,
            Slot::SuccessRate,
            Slot::LastUpdate,
            Slot::JobsList,
            Slot::JobCount,
            Slot::LogsContainer,
            Slot::SourcesBody,
        ] {
            assert!(s.get(slot).is_some(), "{slot} not painted");
        }
        assert!(s.get(Slot::FlowRate1).is_none());
        assert_eq!(d.feed().len(), 8);
    }

    #[test]
    fn records_counter_lands_on_target_after_animation() {
        let mut d = seeded();
        d.start();
        assert!(d.is_animating(Slot::RecordsProcessed));
        d.advance(Duration::from_millis(1_000));
        assert!(!d.is_animating(Slot::RecordsProcessed));
        let text = d.surface().text(Slot::RecordsProcessed).unwrap();
        assert!(text.starts_with("12.") && text.ends_with('M'), "{text}");
    }
}
