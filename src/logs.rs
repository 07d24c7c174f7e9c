//! # Log feed
//! Synthetic pipeline log lines and the bounded, newest-first feed that holds them.

use rand::Rng;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

use crate::catalog::Catalog;
use crate::format::{format_clock_time, format_magnitude};

/// Default number of records kept in the feed.
pub const DEFAULT_LOG_CAPACITY: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

/// Message template. Placeholders: `{source}`, `{batch}`, `{count}`, `{job}`.
#[derive(Debug, Clone, Copy)]
pub struct LogTemplate {
    pub level: LogLevel,
    pub message: &'static str,
}

pub const LOG_TEMPLATES: [LogTemplate; 7] = [
    LogTemplate {
        level: LogLevel::Info,
        message: "Processing batch {batch} from {source}",
    },
    LogTemplate {
        level: LogLevel::Success,
        message: "Completed sync for {source}: {count} records",
    },
    LogTemplate {
        level: LogLevel::Info,
        message: "Starting transformation job: {job}",
    },
    LogTemplate {
        level: LogLevel::Success,
        message: "Schema validation passed for {source}",
    },
    LogTemplate {
        level: LogLevel::Warning,
        message: "Retry attempt 2/3 for {source}",
    },
    LogTemplate {
        level: LogLevel::Info,
        message: "Writing {count} records to Snowflake",
    },
    LogTemplate {
        level: LogLevel::Success,
        message: "Pipeline checkpoint saved",
    },
];

/// Build one fake log line stamped with the current wall-clock time.
pub fn generate_log_record<R: Rng + ?Sized>(rng: &mut R, catalog: &Catalog) -> LogRecord {
    generate_log_record_at(rng, catalog, format_clock_time())
}

/// Same as [`generate_log_record`] with a caller-supplied timestamp.
pub fn generate_log_record_at<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &Catalog,
    timestamp: String,
) -> LogRecord {
    let template = LOG_TEMPLATES[rng.random_range(0..LOG_TEMPLATES.len())];
    let source = catalog.random_source(rng).short_name().to_string();
    let batch = rng.random_range(0..1_000u32).to_string();
    let count = format_magnitude(rng.random_range(0..10_000u64));
    let job = catalog.random_job(rng).name.clone();

    let message = template
        .message
        .replacen("{source}", &source, 1)
        .replacen("{batch}", &batch, 1)
        .replacen("{count}", &count, 1)
        .replacen("{job}", &job, 1);

    LogRecord {
        timestamp,
        level: template.level,
        message,
    }
}

/// Bounded log sequence, newest first.
#[derive(Debug, Clone)]
pub struct LogFeed {
    buf: VecDeque<LogRecord>,
    cap: usize,
}

impl LogFeed {
    /// `cap` of zero is bumped to one.
    pub fn with_capacity(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            buf: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Put `record` at the front, evicting the oldest past capacity.
    pub fn push(&mut self, record: LogRecord) {
        self.buf.push_front(record);
        while self.buf.len() > self.cap {
            self.buf.pop_back();
        }
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Newest record, if any.
    pub fn latest(&self) -> Option<&LogRecord> {
        self.buf.front()
    }

    /// Iterate newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &LogRecord> {
        self.buf.iter()
    }

    pub fn snapshot(&self) -> Vec<LogRecord> {
        self.buf.iter().cloned().collect()
    }
}

impl Default for LogFeed {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}
