use crate::shared::ToolKey;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

const REFILL_WINDOW: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy)]
struct Bucket {
    tokens: f64,
    capacity: f64,
    last_refill: Instant,
}

impl Bucket {
    fn full(capacity: u32, now: Instant) -> Self {
        Self {
            tokens: f64::from(capacity),
            capacity: f64::from(capacity),
            last_refill: now,
        }
    }

    fn refill(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_refill);
        let added = elapsed.as_secs_f64() / REFILL_WINDOW.as_secs_f64() * self.capacity;
        self.tokens = (self.tokens + added).min(self.capacity);
        self.last_refill = now;
    }
}

/// Per-tool token buckets refilled lazily at `capacity` tokens per minute.
///
/// Check and decrement happen under one lock; an empty bucket rejects
/// immediately.
#[derive(Debug, Default)]
pub struct RateLimiter {
    buckets: Mutex<HashMap<ToolKey, Bucket>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self, tool: &ToolKey, capacity: u32) -> bool {
        self.try_acquire_at(tool, capacity, Instant::now())
    }

    pub fn try_acquire_at(&self, tool: &ToolKey, capacity: u32, now: Instant) -> bool {
        if capacity == 0 {
            return false;
        }
        let mut buckets = self
            .buckets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let bucket = buckets
            .entry(tool.clone())
            .or_insert_with(|| Bucket::full(capacity, now));
        if bucket.capacity != f64::from(capacity) {
            bucket.capacity = f64::from(capacity);
            bucket.tokens = bucket.tokens.min(bucket.capacity);
        }
        bucket.refill(now);

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Whole tokens left for `tool`, or `None` before its first call.
    pub fn remaining(&self, tool: &ToolKey) -> Option<u32> {
        let buckets = self
            .buckets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        buckets.get(tool).map(|bucket| bucket.tokens.floor() as u32)
    }
}
