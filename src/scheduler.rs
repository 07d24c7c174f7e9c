// src/scheduler.rs
//! Periodic task schedule on a virtual clock, and the tokio loop that drives it.
//!
//! [`TaskSchedule`] knows nothing about wall time: callers hand it "now" as an
//! offset from start and get back every task that became due, in firing order.
//! Tests advance it by hand; [`spawn_dashboard_loop`] advances it from a tokio
//! interval that also paces animation frames.

use metrics::gauge;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::TaskPeriods;
use crate::dashboard::Dashboard;
use crate::display::DisplaySurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Clock,
    Metrics,
    Jobs,
    Logs,
    FlowRates,
    Sources,
}

impl TaskKind {
    pub const ALL: [TaskKind; 6] = [
        Self::Clock,
        Self::Metrics,
        Self::Jobs,
        Self::Logs,
        Self::FlowRates,
        Self::Sources,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clock => "clock",
            Self::Metrics => "metrics",
            Self::Jobs => "jobs",
            Self::Logs => "logs",
            Self::FlowRates => "flow_rates",
            Self::Sources => "sources",
        }
    }

    pub fn period(self, periods: &TaskPeriods) -> Duration {
        let ms = match self {
            Self::Clock => periods.clock_ms,
            Self::Metrics => periods.metrics_ms,
            Self::Jobs => periods.jobs_ms,
            Self::Logs => periods.logs_ms,
            Self::FlowRates => periods.flow_rates_ms,
            Self::Sources => periods.sources_ms,
        };
        Duration::from_millis(ms.max(1))
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
struct ScheduledTask {
    kind: TaskKind,
    period: Duration,
    next_fire: Duration,
}

/// Independent repeating tasks with next-fire offsets. The first firing is one
/// full period after start; a backlog collapses to a single firing.
#[derive(Debug, Clone)]
pub struct TaskSchedule {
    tasks: Vec<ScheduledTask>,
    now: Duration,
}

impl TaskSchedule {
    pub fn new(periods: &TaskPeriods) -> Self {
        let tasks = TaskKind::ALL
            .into_iter()
            .map(|kind| {
                let period = kind.period(periods);
                ScheduledTask {
                    kind,
                    period,
                    next_fire: period,
                }
            })
            .collect();
        Self {
            tasks,
            now: Duration::ZERO,
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock to `to` and return the tasks that came due in `(now, to]`,
    /// earliest first. An overdue task fires once, stamped with its latest
    /// missed slot, and resumes on its period grid after `to`. Going backwards
    /// is a no-op.
    pub fn advance_to(&mut self, to: Duration) -> Vec<(Duration, TaskKind)> {
        if to <= self.now {
            return Vec::new();
        }
        let mut fired = Vec::new();
        for task in &mut self.tasks {
            if task.next_fire > to {
                continue;
            }
            let missed = ((to - task.next_fire).as_nanos() / task.period.as_nanos()) as u32;
            let at = task.next_fire + task.period * missed;
            fired.push((at, task.kind));
            task.next_fire = at + task.period;
        }
        // stable: ties keep task-list order
        fired.sort_by_key(|(at, _)| *at);
        self.now = to;
        fired
    }

    pub fn next_fire(&self, kind: TaskKind) -> Option<Duration> {
        self.tasks
            .iter()
            .find(|t| t.kind == kind)
            .map(|t| t.next_fire)
    }
}

pub type SharedDashboard<S> = Arc<parking_lot::Mutex<Dashboard<S>>>;

/// Drive `dashboard` from the tokio clock until the process exits.
///
/// One loop owns all mutation: each frame tick locks the dashboard once, runs
/// whatever tasks came due, then paints animation frames.
pub fn spawn_dashboard_loop<S>(dashboard: SharedDashboard<S>, frame: Duration) -> JoinHandle<()>
where
    S: DisplaySurface + Send + 'static,
{
    tokio::spawn(async move {
        let started = Instant::now();
        let mut ticker = time::interval(frame.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            let now = started.elapsed();
            {
                let mut d = dashboard.lock();
                d.advance(now);
            }
            gauge!("monitor_last_tick_ms").set(now.as_millis() as f64);
        }
    })
}
