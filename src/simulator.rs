// src/simulator.rs
//! Headline counters, resampled from scratch on every call.
//!
//! Nothing here accumulates: `records_processed` is a fresh draw around a fixed
//! baseline each time, so consecutive snapshots can go down as well as up.

use rand::Rng;
use serde::Serialize;

pub const RECORDS_BASELINE: u64 = 12_500_000;
pub const RECORDS_JITTER: u64 = 100_000;
pub const THROUGHPUT_BASE: u64 = 1_500;
pub const THROUGHPUT_JITTER: u64 = 1_000;
pub const LATENCY_BASE_MS: u64 = 45;
pub const LATENCY_JITTER_MS: u64 = 30;
pub const SUCCESS_BASE_PCT: f64 = 99.2;
pub const SUCCESS_JITTER_PCT: f64 = 0.7;
pub const FLOW_BASE_K: f64 = 1.0;
pub const FLOW_JITTER_K: f64 = 2.0;

/// Number of flow-rate gauges.
pub const FLOW_GAUGES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub records_processed: u64,
    pub throughput_per_second: u64,
    pub avg_latency_ms: u64,
    pub success_rate_percent: f64,
    /// In thousands of records per second.
    pub flow_rates: [f64; FLOW_GAUGES],
}

impl MetricsSnapshot {
    /// `successRate` slot text, e.g. `"99.5%"`.
    pub fn success_rate_text(&self) -> String {
        format!("{:.1}%", self.success_rate_percent)
    }

    /// `avgLatency` slot text, e.g. `"52ms"`.
    pub fn latency_text(&self) -> String {
        format!("{}ms", self.avg_latency_ms)
    }
}

/// Draw one snapshot; each field is independent.
pub fn simulate_metrics<R: Rng + ?Sized>(rng: &mut R) -> MetricsSnapshot {
    MetricsSnapshot {
        records_processed: RECORDS_BASELINE + rng.random_range(0..RECORDS_JITTER),
        throughput_per_second: THROUGHPUT_BASE + rng.random_range(0..THROUGHPUT_JITTER),
        avg_latency_ms: LATENCY_BASE_MS + rng.random_range(0..LATENCY_JITTER_MS),
        success_rate_percent: SUCCESS_BASE_PCT + rng.random_range(0.0..SUCCESS_JITTER_PCT),
        flow_rates: sample_flow_rates(rng),
    }
}

pub fn sample_flow_rate<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    FLOW_BASE_K + rng.random_range(0.0..FLOW_JITTER_K)
}

pub fn sample_flow_rates<R: Rng + ?Sized>(rng: &mut R) -> [f64; FLOW_GAUGES] {
    std::array::from_fn(|_| sample_flow_rate(rng))
}

/// Flow gauge text, e.g. `"2.3K/s"`.
pub fn format_flow_rate(rate_k: f64) -> String {
    format!("{rate_k:.1}K/s")
}
