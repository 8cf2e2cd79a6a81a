use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::models::analytics::AnalyticsReport;
use crate::models::completion::CompletionEntry;
use crate::models::habit::{Habit, NewHabit};

use super::api::HabitApi;
use super::error::{DispatchError, SyncFailure};

/// A remote operation together with its payload.
#[derive(Debug, Clone)]
pub enum SyncAction {
    LoadHabits,
    LoadAnalytics,
    SubmitCompletion(CompletionEntry),
    DeleteHabit(Uuid),
    CreateHabit(NewHabit),
}

impl SyncAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            SyncAction::LoadHabits => ActionKind::LoadHabits,
            SyncAction::LoadAnalytics => ActionKind::LoadAnalytics,
            SyncAction::SubmitCompletion(_) => ActionKind::SubmitCompletion,
            SyncAction::DeleteHabit(_) => ActionKind::DeleteHabit,
            SyncAction::CreateHabit(_) => ActionKind::CreateHabit,
        }
    }
}

/// Payload-free tag for an action, used in failure reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    LoadHabits,
    LoadAnalytics,
    SubmitCompletion,
    DeleteHabit,
    CreateHabit,
}

impl ActionKind {
    /// Mutations invalidate the client cache on success and interrupt the
    /// user on failure.
    pub fn is_mutation(self) -> bool {
        matches!(
            self,
            ActionKind::SubmitCompletion | ActionKind::DeleteHabit | ActionKind::CreateHabit
        )
    }
}

/// Result of one dispatched action. Exactly one outcome is emitted per
/// dispatch, in completion order.
#[derive(Debug, Clone)]
pub enum SyncOutcome {
    HabitsLoaded(Vec<Habit>),
    AnalyticsLoaded(AnalyticsReport),
    CompletionSaved(String),
    HabitDeleted(String),
    HabitCreated { id: Uuid, message: String },
    Failed(SyncFailure),
}

/// Runs one remote operation at a time on a spawned task.
///
/// Dispatch never waits: the action runs to completion on the runtime,
/// bounded by the request timeout, and its outcome lands on the channel
/// handed out at construction. Dispatching while an action is in flight is
/// refused with [`DispatchError::Busy`].
pub struct SyncWorker<A> {
    api: Arc<A>,
    outcomes: mpsc::UnboundedSender<SyncOutcome>,
    in_flight: Arc<AtomicBool>,
}

impl<A: HabitApi + 'static> SyncWorker<A> {
    pub fn new(api: Arc<A>) -> (Self, mpsc::UnboundedReceiver<SyncOutcome>) {
        let (outcomes, rx) = mpsc::unbounded_channel();
        (
            Self {
                api,
                outcomes,
                in_flight: Arc::new(AtomicBool::new(false)),
            },
            rx,
        )
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn dispatch(&self, action: SyncAction) -> Result<(), DispatchError> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(DispatchError::Busy);
        }

        tracing::debug!(action = ?action.kind(), "dispatching sync action");

        let api = Arc::clone(&self.api);
        let outcomes = self.outcomes.clone();
        let in_flight = Arc::clone(&self.in_flight);
        tokio::spawn(async move {
            let outcome = run_action(api.as_ref(), action).await;
            // Release before sending, so the receiver may chain a follow-up
            // dispatch while it handles this outcome.
            in_flight.store(false, Ordering::Release);
            let _ = outcomes.send(outcome);
        });

        Ok(())
    }
}

async fn run_action<A: HabitApi>(api: &A, action: SyncAction) -> SyncOutcome {
    let kind = action.kind();
    let result = match action {
        SyncAction::LoadHabits => api.list_habits().await.map(SyncOutcome::HabitsLoaded),
        SyncAction::LoadAnalytics => api.load_analytics().await.map(SyncOutcome::AnalyticsLoaded),
        SyncAction::SubmitCompletion(entry) => api
            .record_completion(&entry)
            .await
            .map(|m| SyncOutcome::CompletionSaved(m.message)),
        SyncAction::DeleteHabit(id) => api
            .delete_habit(id)
            .await
            .map(|m| SyncOutcome::HabitDeleted(m.message)),
        SyncAction::CreateHabit(draft) => api.create_habit(&draft).await.map(|created| {
            SyncOutcome::HabitCreated {
                id: created.id,
                message: created.message,
            }
        }),
    };

    result.unwrap_or_else(|error| {
        tracing::warn!(action = ?kind, error = %error, "sync action failed");
        SyncOutcome::Failed(SyncFailure {
            action: kind,
            error,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::error::SyncError;
    use crate::client::testing::FakeHabitApi;
    use tokio::sync::mpsc::error::TryRecvError;

    #[tokio::test]
    async fn each_dispatch_emits_exactly_one_outcome() {
        let api = FakeHabitApi::with_habits(vec![FakeHabitApi::habit("Smoking")]);
        let (worker, mut outcomes) = SyncWorker::new(api);

        worker.dispatch(SyncAction::LoadHabits).unwrap();

        match outcomes.recv().await.unwrap() {
            SyncOutcome::HabitsLoaded(habits) => assert_eq!(habits.len(), 1),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(matches!(outcomes.try_recv(), Err(TryRecvError::Empty)));
        assert!(!worker.is_busy());
    }

    #[tokio::test]
    async fn a_second_dispatch_is_refused_while_one_is_in_flight() {
        let api = FakeHabitApi::new();
        let gate = api.hold_next();
        let (worker, mut outcomes) = SyncWorker::new(api);

        worker.dispatch(SyncAction::LoadHabits).unwrap();
        assert!(worker.is_busy());
        assert_eq!(
            worker.dispatch(SyncAction::LoadAnalytics),
            Err(DispatchError::Busy)
        );

        gate.notify_one();
        assert!(matches!(
            outcomes.recv().await.unwrap(),
            SyncOutcome::HabitsLoaded(_)
        ));

        // The slot frees up once the outcome is delivered.
        worker.dispatch(SyncAction::LoadAnalytics).unwrap();
        assert!(matches!(
            outcomes.recv().await.unwrap(),
            SyncOutcome::AnalyticsLoaded(_)
        ));
    }

    #[tokio::test]
    async fn failures_carry_the_action_kind() {
        let api = FakeHabitApi::new();
        api.fail_next(SyncError::Timeout);
        let (worker, mut outcomes) = SyncWorker::new(api);

        worker.dispatch(SyncAction::LoadAnalytics).unwrap();

        match outcomes.recv().await.unwrap() {
            SyncOutcome::Failed(failure) => {
                assert_eq!(failure.action, ActionKind::LoadAnalytics);
                assert_eq!(failure.error, SyncError::Timeout);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
