//! Client-side synchronization layer for a desktop shell.
//!
//! A UI shell owns one [`SyncOrchestrator`] on its interactive thread, calls
//! [`SyncOrchestrator::tick`] every [`REFRESH_INTERVAL`], and folds the
//! events from [`SyncOrchestrator::next_event`] into what it displays. All
//! network traffic runs one action at a time through a [`SyncWorker`],
//! failures are classified into [`SyncError`]s, and the habit list lives in
//! a time-bounded [`HabitCache`].

pub mod api;
pub mod cache;
pub mod error;
pub mod orchestrator;
pub mod worker;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{HabitApi, HttpHabitApi, REQUEST_TIMEOUT};
pub use cache::{HabitCache, CACHE_TIMEOUT};
pub use error::{DispatchError, SyncError, SyncFailure};
pub use orchestrator::{SyncEvent, SyncOrchestrator, SyncPhase, REFRESH_INTERVAL};
pub use worker::{ActionKind, SyncAction, SyncOutcome, SyncWorker};
