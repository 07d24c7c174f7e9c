//! # Catalog Store
//!
//! Seed data for the dashboard: the data sources shown in the source table
//! and the jobs shown in the active-jobs list.
//!
//! - Sources are read-only after construction.
//! - Jobs carry the only mutable domain state: `progress` climbs every job
//!   tick and wraps back to a small value once it reaches 100, so each job
//!   looks like a repeating run.
//! - Construction rejects empty lists; generators rely on that to sample
//!   without an `Option`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::MonitorError;

/// Upper bound (exclusive) of the per-tick progress increment.
pub const PROGRESS_STEP_MAX: u8 = 5;
/// Upper bound (exclusive) of the progress a job restarts from.
pub const PROGRESS_RESET_MAX: u8 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceCategory {
    Database,
    Api,
    File,
}

impl SourceCategory {
    pub const ALL: [SourceCategory; 3] = [Self::Database, Self::Api, Self::File];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Api => "api",
            Self::File => "file",
        }
    }
}

impl fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Online,
    Syncing,
    Offline,
    Error,
}

impl SourceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Syncing => "syncing",
            Self::Offline => "offline",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSource {
    pub name: String,
    pub category: SourceCategory,
    pub icon: String,
    pub status: SourceStatus,
    pub record_count: u64,
}

impl DataSource {
    pub fn new(
        name: &str,
        category: SourceCategory,
        icon: &str,
        status: SourceStatus,
        record_count: u64,
    ) -> Self {
        Self {
            name: name.to_string(),
            category,
            icon: icon.to_string(),
            status,
            record_count,
        }
    }

    /// Name up to the first `" - "` separator ("PostgreSQL - Users" → "PostgreSQL").
    pub fn short_name(&self) -> &str {
        self.name.split(" - ").next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    Extract,
    Transform,
    Load,
}

impl JobKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Extract => "extract",
            Self::Transform => "transform",
            Self::Load => "load",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Extract => "⬇️",
            Self::Transform => "⚙️",
            Self::Load => "📤",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    pub name: String,
    pub kind: JobKind,
    pub source_label: String,
    /// Always within `0..=100`.
    pub progress: u8,
}

impl Job {
    pub fn new(name: &str, kind: JobKind, source_label: &str, progress: u8) -> Self {
        Self {
            name: name.to_string(),
            kind,
            source_label: source_label.to_string(),
            progress: progress.min(100),
        }
    }

    /// One job tick: add a random step, and restart the run once it hits 100.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let step = rng.random_range(0..PROGRESS_STEP_MAX);
        self.progress = self.progress.saturating_add(step).min(100);
        if self.progress >= 100 {
            self.progress = rng.random_range(0..PROGRESS_RESET_MAX);
        }
    }
}

/// Which slice of the source table is shown. Closed set: `all`, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SourceFilter {
    #[default]
    All,
    Category(SourceCategory),
}

impl SourceFilter {
    pub const ALL: [SourceFilter; 4] = [
        Self::All,
        Self::Category(SourceCategory::Database),
        Self::Category(SourceCategory::Api),
        Self::Category(SourceCategory::File),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Category(c) => c.as_str(),
        }
    }

    pub fn matches(self, source: &DataSource) -> bool {
        match self {
            Self::All => true,
            Self::Category(c) => source.category == c,
        }
    }
}

impl FromStr for SourceFilter {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "database" => Ok(Self::Category(SourceCategory::Database)),
            "api" => Ok(Self::Category(SourceCategory::Api)),
            "file" => Ok(Self::Category(SourceCategory::File)),
            _ => Err(MonitorError::UnknownFilter(s.to_string())),
        }
    }
}

impl TryFrom<String> for SourceFilter {
    type Error = MonitorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SourceFilter> for String {
    fn from(f: SourceFilter) -> Self {
        f.as_str().to_string()
    }
}

impl fmt::Display for SourceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-memory store of sources and jobs.
#[derive(Debug, Clone)]
pub struct Catalog {
    sources: Vec<DataSource>,
    jobs: Vec<Job>,
}

impl Catalog {
    pub fn new(sources: Vec<DataSource>, jobs: Vec<Job>) -> Result<Self, MonitorError> {
        if sources.is_empty() || jobs.is_empty() {
            return Err(MonitorError::EmptyCatalog);
        }
        Ok(Self { sources, jobs })
    }

    /// The built-in pipeline: eight sources across three categories, five jobs.
    pub fn default_seed() -> Self {
        use SourceCategory::*;
        use SourceStatus::*;

        let sources = vec![
            DataSource::new("PostgreSQL - Users", Database, "🐘", Online, 1_245_678),
            DataSource::new("MySQL - Transactions", Database, "🐬", Online, 3_456_789),
            DataSource::new("Salesforce API", Api, "☁️", Online, 89_234),
            DataSource::new("Stripe Webhooks", Api, "💳", Syncing, 234_567),
            DataSource::new("S3 - Logs", File, "📦", Online, 567_890),
            DataSource::new("Google Analytics", Api, "📊", Online, 123_456),
            DataSource::new("CSV Uploads", File, "📄", Online, 45_678),
            DataSource::new("MongoDB - Events", Database, "🍃", Online, 789_012),
        ];

        let jobs = vec![
            Job::new("user_data_sync", JobKind::Extract, "PostgreSQL", 78),
            Job::new("transaction_agg", JobKind::Transform, "MySQL", 45),
            Job::new("daily_metrics", JobKind::Transform, "Analytics", 92),
            Job::new("sf_lead_import", JobKind::Extract, "Salesforce", 23),
            Job::new("warehouse_load", JobKind::Load, "Snowflake", 67),
        ];

        Self { sources, jobs }
    }

    pub fn sources(&self) -> &[DataSource] {
        &self.sources
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Sources visible under `filter`, in catalog order.
    pub fn filtered_sources(&self, filter: SourceFilter) -> Vec<&DataSource> {
        self.sources.iter().filter(|s| filter.matches(s)).collect()
    }

    /// Advance every job by one tick.
    pub fn advance_jobs<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for job in &mut self.jobs {
            job.advance(rng);
        }
    }

    pub fn random_source<R: Rng + ?Sized>(&self, rng: &mut R) -> &DataSource {
        &self.sources[rng.random_range(0..self.sources.len())]
    }

    pub fn random_job<R: Rng + ?Sized>(&self, rng: &mut R) -> &Job {
        &self.jobs[rng.random_range(0..self.jobs.len())]
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::default_seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn short_name_cuts_at_separator() {
        let c = Catalog::default_seed();
        let names: Vec<&str> = c.sources().iter().map(|s| s.short_name()).collect();
        assert_eq!(names[0], "PostgreSQL");
        assert_eq!(names[2], "Salesforce API");
        assert_eq!(names[4], "S3");
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let err = Catalog::new(vec![], vec![]).unwrap_err();
        assert_eq!(err, MonitorError::EmptyCatalog);
    }

    #[test]
    fn job_at_99_wraps_below_30_or_stays() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut job = Job::new("j", JobKind::Load, "x", 99);
            job.advance(&mut rng);
            // step 0 keeps it at 99, anything else wraps
            assert!(job.progress == 99 || job.progress < PROGRESS_RESET_MAX);
        }
    }

    #[test]
    fn filter_parsing_is_closed() {
        assert_eq!("all".parse::<SourceFilter>().unwrap(), SourceFilter::All);
        assert_eq!(
            " API ".parse::<SourceFilter>().unwrap(),
            SourceFilter::Category(SourceCategory::Api)
        );
        assert!("stream".parse::<SourceFilter>().is_err());
    }
}
