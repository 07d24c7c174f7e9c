// src/smoother.rs
//! Eased counter transitions.
//!
//! A [`ValueTransition`] captures `(from, to, started_at, duration)` once and is
//! then sampled at frame timestamps. [`Animations`] keeps at most one live
//! transition per display slot: starting a new one on a busy slot replaces the
//! old one (last writer wins, nothing is queued).

use std::collections::HashMap;
use std::time::Duration;

use crate::display::Slot;

/// `1 - (1 - t)^3`, with `t` clamped to `[0, 1]`.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueTransition {
    from: i64,
    to: i64,
    started_at: Duration,
    duration: Duration,
}

impl ValueTransition {
    pub fn new(from: i64, to: i64, started_at: Duration, duration: Duration) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
        }
    }

    /// Elapsed fraction in `[0, 1]`. A zero duration is complete immediately.
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }

    /// Displayed value at `now`; exactly `to` once the duration has elapsed.
    pub fn value_at(&self, now: Duration) -> i64 {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        let delta = (self.to - self.from) as f64;
        self.from + (delta * ease_out_cubic(t)).floor() as i64
    }

    /// Sample at each frame timestamp; the iterator ends after the frame that
    /// reaches the target.
    pub fn frames<I>(self, timestamps: I) -> Frames<I::IntoIter>
    where
        I: IntoIterator<Item = Duration>,
    {
        Frames {
            transition: self,
            timestamps: timestamps.into_iter(),
            done: false,
        }
    }
}

pub struct Frames<I> {
    transition: ValueTransition,
    timestamps: I,
    done: bool,
}

impl<I: Iterator<Item = Duration>> Iterator for Frames<I> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.done {
            return None;
        }
        let now = self.timestamps.next()?;
        self.done = self.transition.is_finished(now);
        Some(self.transition.value_at(now))
    }
}

/// Live transitions keyed by slot, plus the last value written to each slot.
#[derive(Debug, Default)]
pub struct Animations {
    duration: Duration,
    live: HashMap<Slot, ValueTransition>,
    shown: HashMap<Slot, i64>,
}

impl Animations {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            live: HashMap::new(),
            shown: HashMap::new(),
        }
    }

    /// Begin easing `slot` from whatever it currently shows towards `target`.
    pub fn start(&mut self, slot: Slot, target: i64, now: Duration) {
        let from = self.shown.get(&slot).copied().unwrap_or(0);
        self.live
            .insert(slot, ValueTransition::new(from, target, now, self.duration));
    }

    /// Advance every live transition to `now`, returning the values to paint.
    /// Finished transitions are dropped after their final write.
    pub fn frame(&mut self, now: Duration) -> Vec<(Slot, i64)> {
        let mut out = Vec::with_capacity(self.live.len());
        self.live.retain(|slot, tr| {
            let v = tr.value_at(now);
            out.push((*slot, v));
            !tr.is_finished(now)
        });
        for (slot, v) in &out {
            self.shown.insert(*slot, *v);
        }
        out
    }

    pub fn is_animating(&self, slot: Slot) -> bool {
        self.live.contains_key(&slot)
    }

    pub fn shown(&self, slot: Slot) -> Option<i64> {
        self.shown.get(&slot).copied()
    }
}
