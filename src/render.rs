// src/render.rs
//! HTML fragments for the list/table slots.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use rand::Rng;
use std::fmt::Write as _;

use crate::catalog::{DataSource, Job};
use crate::format::format_magnitude;
use crate::logs::LogRecord;

/// `jobCount` text, e.g. `"5 Running"`.
pub fn job_count_text(jobs: &[Job]) -> String {
    format!("{} Running", jobs.len())
}

pub fn render_jobs(jobs: &[Job]) -> String {
    let mut out = String::new();
    for job in jobs {
        let _ = write!(
            out,
            r#"<div class="job-item"><div class="job-info"><div class="job-icon {kind}">{icon}</div><div class="job-details"><span class="job-name">{name}</span><span class="job-meta">{meta}</span></div></div><div class="job-progress"><div class="progress-bar"><div class="progress-fill" style="width: {p}%"></div></div><span class="progress-text">{p}%</span></div></div>"#,
            kind = job.kind.as_str(),
            icon = job.kind.icon(),
            name = text(&job.name),
            meta = text(&job.source_label),
            p = job.progress,
        );
    }
    out
}

pub fn render_logs<'a>(records: impl IntoIterator<Item = &'a LogRecord>) -> String {
    let mut out = String::new();
    for r in records {
        let _ = write!(
            out,
            r#"<div class="log-entry"><span class="log-time">{time}</span><span class="log-level {level}">{upper}</span><span class="log-message">{msg}</span></div>"#,
            time = text(&r.timestamp),
            level = r.level.as_str(),
            upper = r.level.as_str().to_ascii_uppercase(),
            msg = text(&r.message),
        );
    }
    out
}

/// One `<tr>` per source. Sync age and latency are decorative and drawn fresh
/// for every row: sync in `[1, 6)` minutes, latency in `[20, 120)` ms.
pub fn render_sources<'a, R: Rng + ?Sized>(
    sources: impl IntoIterator<Item = &'a DataSource>,
    rng: &mut R,
) -> String {
    let mut out = String::new();
    for s in sources {
        let latency = rng.random_range(20..120u32);
        let last_sync = rng.random_range(1..6u32);
        let _ = write!(
            out,
            r#"<tr data-category="{cat}"><td><div class="source-name"><span class="source-icon">{icon}</span><span>{name}</span></div></td><td><span class="source-type">{cat}</span></td><td><span class="source-status {status}"><span class="status-dot"></span>{status}</span></td><td>{last_sync}m ago</td><td>{records}</td><td>{latency}ms</td></tr>"#,
            cat = attr(s.category.as_str()),
            icon = text(&s.icon),
            name = text(&s.name),
            status = s.status.as_str(),
            records = format_magnitude(s.record_count),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{JobKind, SourceCategory, SourceStatus};
    use crate::logs::LogLevel;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn job_row_shows_progress_twice() {
        let jobs = vec![Job::new("daily_metrics", JobKind::Transform, "Analytics", 92)];
        let html = render_jobs(&jobs);
        assert!(html.contains("width: 92%"));
        assert!(html.contains(">92%<"));
        assert!(html.contains("⚙️"));
        assert_eq!(job_count_text(&jobs), "1 Running");
    }

    #[test]
    fn log_message_is_escaped() {
        let r = LogRecord {
            timestamp: "10:00:00".into(),
            level: LogLevel::Warning,
            message: "<script>x</script>".into(),
        };
        let html = render_logs([&r]);
        assert!(html.contains("WARNING"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn source_row_formats_records() {
        let s = DataSource::new(
            "MySQL - Transactions",
            SourceCategory::Database,
            "🐬",
            SourceStatus::Syncing,
            3_456_789,
        );
        let mut rng = StdRng::seed_from_u64(9);
        let html = render_sources([&s], &mut rng);
        assert!(html.contains("3.5M"));
        assert!(html.contains("source-status syncing"));
        assert!(html.contains("m ago"));
    }
}
