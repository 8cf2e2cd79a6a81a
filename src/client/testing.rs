//! Scripted stand-in for the remote service, shared by the sync-layer tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Notify;
use uuid::Uuid;

use crate::models::analytics::{AnalyticsReport, TotalStats};
use crate::models::completion::{Completion, CompletionEntry};
use crate::models::habit::{Difficulty, Frequency, Habit, NewHabit};
use crate::models::{HabitCreated, MessageResponse};

use super::api::HabitApi;
use super::error::SyncError;

pub(crate) struct FakeHabitApi {
    habits: Mutex<Vec<Habit>>,
    fail_next: Mutex<Option<SyncError>>,
    gate: Mutex<Option<Arc<Notify>>>,
    pub list_calls: AtomicUsize,
    pub mutation_calls: AtomicUsize,
    pub last_entry: Mutex<Option<CompletionEntry>>,
}

impl FakeHabitApi {
    pub fn new() -> Arc<Self> {
        Self::with_habits(Vec::new())
    }

    pub fn with_habits(habits: Vec<Habit>) -> Arc<Self> {
        Arc::new(Self {
            habits: Mutex::new(habits),
            fail_next: Mutex::new(None),
            gate: Mutex::new(None),
            list_calls: AtomicUsize::new(0),
            mutation_calls: AtomicUsize::new(0),
            last_entry: Mutex::new(None),
        })
    }

    /// Script the next call to fail with `error`.
    pub fn fail_next(&self, error: SyncError) {
        *self.fail_next.lock().unwrap() = Some(error);
    }

    /// Hold the next call until the returned notifier fires.
    pub fn hold_next(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(Arc::clone(&notify));
        notify
    }

    pub fn habit(name: &str) -> Habit {
        Habit {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            habit_type: "bad".into(),
            frequency: Frequency::Daily,
            target_count: 1,
            motivation_text: None,
            difficulty_level: Difficulty::Medium,
            created_at: Utc::now(),
        }
    }

    async fn pass_gate(&self) {
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    fn take_failure(&self) -> Option<SyncError> {
        self.fail_next.lock().unwrap().take()
    }
}

#[async_trait]
impl HabitApi for FakeHabitApi {
    async fn list_habits(&self) -> Result<Vec<Habit>, SyncError> {
        self.pass_gate().await;
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        match self.take_failure() {
            Some(error) => Err(error),
            None => Ok(self.habits.lock().unwrap().clone()),
        }
    }

    async fn create_habit(&self, draft: &NewHabit) -> Result<HabitCreated, SyncError> {
        self.pass_gate().await;
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        match self.take_failure() {
            Some(error) => Err(error),
            None => Ok(HabitCreated {
                id: Uuid::new_v4(),
                message: format!("created {}", draft.name),
            }),
        }
    }

    async fn record_completion(
        &self,
        entry: &CompletionEntry,
    ) -> Result<MessageResponse, SyncError> {
        self.pass_gate().await;
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_entry.lock().unwrap() = Some(entry.clone());
        match self.take_failure() {
            Some(error) => Err(error),
            None => Ok(MessageResponse {
                message: "Habit completion recorded".into(),
            }),
        }
    }

    async fn delete_habit(&self, _habit_id: Uuid) -> Result<MessageResponse, SyncError> {
        self.pass_gate().await;
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        match self.take_failure() {
            Some(error) => Err(error),
            None => Ok(MessageResponse {
                message: "Habit deleted successfully".into(),
            }),
        }
    }

    async fn list_completions(&self, _habit_id: Uuid) -> Result<Vec<Completion>, SyncError> {
        self.pass_gate().await;
        match self.take_failure() {
            Some(error) => Err(error),
            None => Ok(Vec::new()),
        }
    }

    async fn load_analytics(&self) -> Result<AnalyticsReport, SyncError> {
        self.pass_gate().await;
        match self.take_failure() {
            Some(error) => Err(error),
            None => Ok(AnalyticsReport {
                habit_stats: Vec::new(),
                total_stats: TotalStats::default(),
            }),
        }
    }
}
