// src/config.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::logs::DEFAULT_LOG_CAPACITY;

pub const ENV_CONFIG_PATH: &str = "MONITOR_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/monitor.toml";

/// Refresh period of each scheduled task, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskPeriods {
    pub clock_ms: u64,
    pub metrics_ms: u64,
    pub jobs_ms: u64,
    pub logs_ms: u64,
    pub flow_rates_ms: u64,
    pub sources_ms: u64,
}

impl Default for TaskPeriods {
    fn default() -> Self {
        Self {
            clock_ms: 1_000,
            metrics_ms: 3_000,
            jobs_ms: 2_000,
            logs_ms: 4_000,
            flow_rates_ms: 2_500,
            sources_ms: 5_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub periods: TaskPeriods,
    pub log_capacity: usize,
    /// Records generated at startup, before any task runs.
    pub initial_logs: usize,
    pub animation_ms: u64,
    /// Frame cadence for counter animations.
    pub frame_ms: u64,
    /// Fixed seed for reproducible runs; OS entropy otherwise.
    pub rng_seed: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            periods: TaskPeriods::default(),
            log_capacity: DEFAULT_LOG_CAPACITY,
            initial_logs: 8,
            animation_ms: 1_000,
            frame_ms: 16,
            rng_seed: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: DashboardConfig = toml::from_str(s).context("parsing dashboard config")?;
        Ok(cfg.sanitized())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading dashboard config from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// 1) $MONITOR_CONFIG_PATH (must exist when set)
    /// 2) config/monitor.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            return Self::load_from(&pb);
        }
        let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default_p.exists() {
            return Self::load_from(&default_p);
        }
        Ok(Self::default())
    }

    /// Replace unusable values with something that keeps every task alive.
    pub fn sanitized(mut self) -> Self {
        let d = TaskPeriods::default();
        let p = &mut self.periods;
        for (v, dflt) in [
            (&mut p.clock_ms, d.clock_ms),
            (&mut p.metrics_ms, d.metrics_ms),
            (&mut p.jobs_ms, d.jobs_ms),
            (&mut p.logs_ms, d.logs_ms),
            (&mut p.flow_rates_ms, d.flow_rates_ms),
            (&mut p.sources_ms, d.sources_ms),
        ] {
            if *v == 0 {
                *v = dflt;
            }
        }
        self.log_capacity = self.log_capacity.max(1);
        self.initial_logs = self.initial_logs.min(self.log_capacity);
        self.frame_ms = self.frame_ms.max(1);
        self
    }

    pub fn animation(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs};

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg = DashboardConfig::from_toml_str(
            r#"
            log_capacity = 5
            rng_seed = 11

            [periods]
            logs_ms = 500
            "#,
        )
        .unwrap();
        assert_eq!(cfg.log_capacity, 5);
        assert_eq!(cfg.initial_logs, 5);
        assert_eq!(cfg.rng_seed, Some(11));
        assert_eq!(cfg.periods.logs_ms, 500);
        assert_eq!(cfg.periods.clock_ms, 1_000);
    }

    #[test]
    fn zero_values_are_repaired() {
        let cfg = DashboardConfig::from_toml_str(
            r#"
            log_capacity = 0
            frame_ms = 0
            [periods]
            metrics_ms = 0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.log_capacity, 1);
        assert_eq!(cfg.frame_ms, 1);
        assert_eq!(cfg.periods.metrics_ms, 3_000);
    }

    #[test]
    fn unknown_shape_is_an_error() {
        assert!(DashboardConfig::from_toml_str("log_capacity = \"lots\"").is_err());
    }

    #[serial_test::serial]
    #[test]
    fn default_uses_env_then_fallbacks() {
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();
        env::remove_var(ENV_CONFIG_PATH);

        // nothing on disk → built-in defaults
        let cfg = DashboardConfig::load_default().unwrap();
        assert_eq!(cfg, DashboardConfig::default());

        // config/monitor.toml is picked up
        fs::create_dir_all("config").unwrap();
        fs::write(DEFAULT_CONFIG_PATH, "initial_logs = 3").unwrap();
        assert_eq!(DashboardConfig::load_default().unwrap().initial_logs, 3);

        // env wins over the default path
        let p = tmp.path().join("alt.toml");
        fs::write(&p, "initial_logs = 4").unwrap();
        env::set_var(ENV_CONFIG_PATH, p.display().to_string());
        assert_eq!(DashboardConfig::load_default().unwrap().initial_logs, 4);

        // env pointing nowhere is an error
        env::set_var(ENV_CONFIG_PATH, tmp.path().join("missing.toml"));
        assert!(DashboardConfig::load_default().is_err());

        env::remove_var(ENV_CONFIG_PATH);
        env::set_current_dir(&old).unwrap();
    }
}
