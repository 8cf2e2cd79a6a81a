use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::models::analytics::AnalyticsReport;
use crate::models::completion::CompletionEntry;
use crate::models::habit::{Habit, NewHabit};

use super::api::HabitApi;
use super::cache::{HabitCache, CACHE_TIMEOUT};
use super::error::{DispatchError, SyncFailure};
use super::worker::{ActionKind, SyncAction, SyncOutcome, SyncWorker};

/// How often the host should call [`SyncOrchestrator::tick`].
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Where the orchestrator sits in its single-flight cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    Fetching,
    Mutating,
}

/// An applied outcome, as surfaced to the host.
#[derive(Debug)]
pub enum SyncEvent {
    /// The habit snapshot and the name lookup were replaced.
    HabitsRefreshed { count: usize },
    /// An analytics report arrived. Reports are handed through for display
    /// and never cached.
    AnalyticsReady(AnalyticsReport),
    /// A mutation landed on the server. The snapshot is already invalidated
    /// and a refetch is in flight.
    MutationApplied { action: ActionKind, message: String },
    /// The action failed; local state is exactly as before the attempt.
    Failed(SyncFailure),
}

/// Drives the sync cycle for a UI shell.
///
/// The shell owns one orchestrator on its interactive thread, calls
/// [`tick`](Self::tick) on a [`REFRESH_INTERVAL`] timer, starts user actions
/// through the dispatch methods, and folds each [`SyncEvent`] from
/// [`next_event`](Self::next_event) into what it displays. Dispatch methods
/// refuse with [`DispatchError::Busy`] while an action is in flight, leaving
/// local state untouched; the in-flight action's outcome still arrives.
pub struct SyncOrchestrator<A> {
    worker: SyncWorker<A>,
    outcomes: mpsc::UnboundedReceiver<SyncOutcome>,
    cache: HabitCache,
    phase: SyncPhase,
    lookup: HashMap<String, Uuid>,
}

impl<A: HabitApi + 'static> SyncOrchestrator<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self::with_cache_timeout(api, CACHE_TIMEOUT)
    }

    pub fn with_cache_timeout(api: Arc<A>, timeout: Duration) -> Self {
        let (worker, outcomes) = SyncWorker::new(api);
        Self {
            worker,
            outcomes,
            cache: HabitCache::new(timeout),
            phase: SyncPhase::Idle,
            lookup: HashMap::new(),
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// The last fetched habit list; possibly stale, never partially updated.
    pub fn habits(&self) -> &[Habit] {
        self.cache.snapshot()
    }

    /// Resolve a habit's id from its display name, as of the last refresh.
    pub fn habit_id(&self, name: &str) -> Option<Uuid> {
        self.lookup.get(name).copied()
    }

    pub fn cache(&self) -> &HabitCache {
        &self.cache
    }

    /// Start a habit-list refetch. Also the path a stale tick takes.
    pub fn refresh(&mut self) -> Result<(), DispatchError> {
        self.start(SyncPhase::Fetching, SyncAction::LoadHabits)
    }

    /// Start an analytics fetch. The result is displayed, not cached, so the
    /// habit snapshot keeps its age.
    pub fn load_analytics(&mut self) -> Result<(), DispatchError> {
        self.start(SyncPhase::Fetching, SyncAction::LoadAnalytics)
    }

    pub fn create_habit(&mut self, draft: NewHabit) -> Result<(), DispatchError> {
        if draft.name.trim().is_empty() {
            return Err(DispatchError::Validation("Habit name is required".into()));
        }
        self.start(SyncPhase::Mutating, SyncAction::CreateHabit(draft))
    }

    /// Record one day's entry. Out-of-range ratings are clamped into 0-10
    /// before anything leaves the client.
    pub fn submit_completion(&mut self, mut entry: CompletionEntry) -> Result<(), DispatchError> {
        entry.clamp_levels();
        self.start(SyncPhase::Mutating, SyncAction::SubmitCompletion(entry))
    }

    pub fn delete_habit(&mut self, habit_id: Uuid) -> Result<(), DispatchError> {
        self.start(SyncPhase::Mutating, SyncAction::DeleteHabit(habit_id))
    }

    /// Periodic entry point. Starts a refetch only when idle with a stale
    /// snapshot; returns whether one was started.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.phase == SyncPhase::Idle && self.cache.should_refresh(now) {
            self.refresh().is_ok()
        } else {
            false
        }
    }

    fn start(&mut self, phase: SyncPhase, action: SyncAction) -> Result<(), DispatchError> {
        if self.phase != SyncPhase::Idle {
            return Err(DispatchError::Busy);
        }
        self.worker.dispatch(action)?;
        self.phase = phase;
        Ok(())
    }

    /// Wait for the next worker outcome, fold it into local state, and hand
    /// back the host-visible event. Outcomes are applied strictly in
    /// completion order. Returns `None` only if the worker side is gone.
    pub async fn next_event(&mut self) -> Option<SyncEvent> {
        let outcome = self.outcomes.recv().await?;
        Some(self.apply(outcome, Instant::now()))
    }

    fn apply(&mut self, outcome: SyncOutcome, now: Instant) -> SyncEvent {
        match outcome {
            SyncOutcome::HabitsLoaded(habits) => {
                self.lookup = habits.iter().map(|h| (h.name.clone(), h.id)).collect();
                let count = habits.len();
                self.cache.record_fetch(habits, now);
                self.phase = SyncPhase::Idle;
                SyncEvent::HabitsRefreshed { count }
            }
            SyncOutcome::AnalyticsLoaded(report) => {
                self.phase = SyncPhase::Idle;
                SyncEvent::AnalyticsReady(report)
            }
            SyncOutcome::CompletionSaved(message) => {
                self.apply_mutation(ActionKind::SubmitCompletion, message)
            }
            SyncOutcome::HabitDeleted(message) => {
                self.apply_mutation(ActionKind::DeleteHabit, message)
            }
            SyncOutcome::HabitCreated { message, .. } => {
                self.apply_mutation(ActionKind::CreateHabit, message)
            }
            SyncOutcome::Failed(failure) => {
                self.phase = SyncPhase::Idle;
                SyncEvent::Failed(failure)
            }
        }
    }

    /// A mutation landed: drop the snapshot's freshness and chain a refetch
    /// so the visible list catches up. The worker slot is already free when
    /// an outcome is being applied, so the chained dispatch cannot be
    /// refused.
    fn apply_mutation(&mut self, action: ActionKind, message: String) -> SyncEvent {
        self.cache.invalidate();
        self.phase = if self.worker.dispatch(SyncAction::LoadHabits).is_ok() {
            SyncPhase::Fetching
        } else {
            SyncPhase::Idle
        };
        SyncEvent::MutationApplied { action, message }
    }
}
