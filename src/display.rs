// src/display.rs
//! Display surface boundary.
//!
//! The dashboard only ever talks to a [`DisplaySurface`]: it writes text or
//! HTML into named slots and marks which filter control is active. A write to
//! a slot the surface does not have is reported back as `false` and skipped.

use parking_lot::RwLock;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::catalog::SourceFilter;
use crate::error::MonitorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    RecordsProcessed,
    Throughput,
    AvgLatency,
    SuccessRate,
    LastUpdate,
    JobsList,
    JobCount,
    LogsContainer,
    SourcesBody,
    FlowRate1,
    FlowRate2,
    FlowRate3,
}

impl Slot {
    pub const ALL: [Slot; 12] = [
        Self::RecordsProcessed,
        Self::Throughput,
        Self::AvgLatency,
        Self::SuccessRate,
        Self::LastUpdate,
        Self::JobsList,
        Self::JobCount,
        Self::LogsContainer,
        Self::SourcesBody,
        Self::FlowRate1,
        Self::FlowRate2,
        Self::FlowRate3,
    ];

    pub const FLOW_RATES: [Slot; 3] = [Self::FlowRate1, Self::FlowRate2, Self::FlowRate3];

    pub fn id(self) -> &'static str {
        match self {
            Self::RecordsProcessed => "recordsProcessed",
            Self::Throughput => "throughput",
            Self::AvgLatency => "avgLatency",
            Self::SuccessRate => "successRate",
            Self::LastUpdate => "lastUpdate",
            Self::JobsList => "jobsList",
            Self::JobCount => "jobCount",
            Self::LogsContainer => "logsContainer",
            Self::SourcesBody => "sourcesBody",
            Self::FlowRate1 => "flowRate1",
            Self::FlowRate2 => "flowRate2",
            Self::FlowRate3 => "flowRate3",
        }
    }
}

impl FromStr for Slot {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Slot::ALL
            .into_iter()
            .find(|slot| slot.id() == s)
            .ok_or_else(|| MonitorError::UnknownSlot(s.to_string()))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum SlotContent {
    Text(String),
    Html(String),
}

impl SlotContent {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Html(s) => s,
        }
    }
}

pub trait DisplaySurface {
    /// Replace the contents of `slot`. Returns `false` if the slot is missing.
    fn write(&self, slot: Slot, content: SlotContent) -> bool;

    /// Mark exactly one filter control as active.
    fn activate_filter(&self, filter: SourceFilter);

    fn set_text(&self, slot: Slot, text: impl Into<String>) -> bool
    where
        Self: Sized,
    {
        self.write(slot, SlotContent::Text(text.into()))
    }

    fn set_html(&self, slot: Slot, html: impl Into<String>) -> bool
    where
        Self: Sized,
    {
        self.write(slot, SlotContent::Html(html.into()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SurfaceSnapshot {
    pub active_filter: SourceFilter,
    pub slots: BTreeMap<String, SlotContent>,
}

#[derive(Debug)]
struct SurfaceInner {
    present: HashSet<Slot>,
    contents: BTreeMap<Slot, SlotContent>,
    active_filter: SourceFilter,
}

/// Shared in-process surface; clones see the same slots.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    inner: Arc<RwLock<SurfaceInner>>,
}

impl MemorySurface {
    /// Surface with every known slot present.
    pub fn new() -> Self {
        Self::with_slots(Slot::ALL)
    }

    /// Surface with only `slots` present; writes to the rest are dropped.
    pub fn with_slots(slots: impl IntoIterator<Item = Slot>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SurfaceInner {
                present: slots.into_iter().collect(),
                contents: BTreeMap::new(),
                active_filter: SourceFilter::All,
            })),
        }
    }

    pub fn get(&self, slot: Slot) -> Option<SlotContent> {
        self.inner.read().contents.get(&slot).cloned()
    }

    pub fn text(&self, slot: Slot) -> Option<String> {
        self.get(slot).map(|c| c.as_str().to_string())
    }

    pub fn active_filter(&self) -> SourceFilter {
        self.inner.read().active_filter
    }

    pub fn snapshot(&self) -> SurfaceSnapshot {
        let g = self.inner.read();
        SurfaceSnapshot {
            active_filter: g.active_filter,
            slots: g
                .contents
                .iter()
                .map(|(k, v)| (k.id().to_string(), v.clone()))
                .collect(),
        }
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for MemorySurface {
    fn write(&self, slot: Slot, content: SlotContent) -> bool {
        let mut g = self.inner.write();
        if !g.present.contains(&slot) {
            return false;
        }
        g.contents.insert(slot, content);
        true
    }

    fn activate_filter(&self, filter: SourceFilter) {
        self.inner.write().active_filter = filter;
    }
}
