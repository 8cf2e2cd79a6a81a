use std::time::{Duration, Instant};

use crate::models::habit::Habit;

/// Staleness threshold for the habit snapshot.
pub const CACHE_TIMEOUT: Duration = Duration::from_secs(30);

/// The last successfully fetched habit list plus when it was fetched.
///
/// A single whole-list snapshot owned by its orchestrator. Invalidation
/// clears only the timestamp, so the stale list stays available for display
/// until a refetch replaces it.
#[derive(Debug)]
pub struct HabitCache {
    snapshot: Vec<Habit>,
    last_fetch: Option<Instant>,
    timeout: Duration,
}

impl HabitCache {
    pub fn new(timeout: Duration) -> Self {
        Self {
            snapshot: Vec::new(),
            last_fetch: None,
            timeout,
        }
    }

    /// True when no fetch has ever succeeded, or the last one is strictly
    /// older than the threshold. A snapshot exactly at the threshold still
    /// counts as fresh.
    pub fn should_refresh(&self, now: Instant) -> bool {
        match self.last_fetch {
            None => true,
            Some(fetched) => now.saturating_duration_since(fetched) > self.timeout,
        }
    }

    pub fn record_fetch(&mut self, snapshot: Vec<Habit>, now: Instant) {
        self.snapshot = snapshot;
        self.last_fetch = Some(now);
    }

    /// Force the next staleness check to report stale, regardless of age.
    pub fn invalidate(&mut self) {
        self.last_fetch = None;
    }

    pub fn snapshot(&self) -> &[Habit] {
        &self.snapshot
    }

    pub fn last_fetch(&self) -> Option<Instant> {
        self.last_fetch
    }
}

impl Default for HabitCache {
    fn default() -> Self {
        Self::new(CACHE_TIMEOUT)
    }
}
