use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::models::analytics::AnalyticsReport;
use crate::models::completion::{Completion, CompletionEntry};
use crate::models::habit::{Habit, NewHabit};
use crate::models::{HabitCreated, MessageResponse};

use super::error::SyncError;

/// Fixed per-call deadline. Every dispatched action finishes, or fails with
/// [`SyncError::Timeout`], within this bound.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// The remote habit service as seen by the sync layer.
#[async_trait]
pub trait HabitApi: Send + Sync {
    async fn list_habits(&self) -> Result<Vec<Habit>, SyncError>;
    async fn create_habit(&self, draft: &NewHabit) -> Result<HabitCreated, SyncError>;
    async fn record_completion(&self, entry: &CompletionEntry)
        -> Result<MessageResponse, SyncError>;
    async fn delete_habit(&self, habit_id: Uuid) -> Result<MessageResponse, SyncError>;
    async fn list_completions(&self, habit_id: Uuid) -> Result<Vec<Completion>, SyncError>;
    async fn load_analytics(&self) -> Result<AnalyticsReport, SyncError>;
}

/// reqwest-backed client for the habit service.
#[derive(Debug, Clone)]
pub struct HttpHabitApi {
    base: Url,
    client: Client,
}

impl HttpHabitApi {
    pub fn new(base_url: &str) -> Result<Self, SyncError> {
        let base = Url::parse(base_url)
            .map_err(|e| SyncError::Unexpected(format!("invalid base url: {e}")))?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SyncError::Unexpected(e.to_string()))?;
        Ok(Self { base, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, SyncError> {
        self.base
            .join(path)
            .map_err(|e| SyncError::Unexpected(format!("invalid endpoint {path}: {e}")))
    }

    /// Decode a 2xx body, or map any other status to the action's
    /// [`SyncError::RequestFailed`] message.
    async fn decode<T: DeserializeOwned>(response: Response, failure: &str) -> Result<T, SyncError> {
        if !response.status().is_success() {
            return Err(SyncError::RequestFailed(failure.to_string()));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| SyncError::Unexpected(e.to_string()))
    }
}

fn transport_error(err: reqwest::Error) -> SyncError {
    if err.is_connect() {
        SyncError::ServiceUnavailable
    } else if err.is_timeout() {
        SyncError::Timeout
    } else {
        SyncError::Unexpected(err.to_string())
    }
}

#[async_trait]
impl HabitApi for HttpHabitApi {
    async fn list_habits(&self) -> Result<Vec<Habit>, SyncError> {
        let response = self
            .client
            .get(self.endpoint("/habits/")?)
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode(response, "failed to load habits").await
    }

    async fn create_habit(&self, draft: &NewHabit) -> Result<HabitCreated, SyncError> {
        let response = self
            .client
            .post(self.endpoint("/habits/")?)
            .json(draft)
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode(response, "failed to create habit").await
    }

    async fn record_completion(
        &self,
        entry: &CompletionEntry,
    ) -> Result<MessageResponse, SyncError> {
        let response = self
            .client
            .post(self.endpoint("/habits/complete/")?)
            .json(entry)
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode(response, "failed to save completion").await
    }

    async fn delete_habit(&self, habit_id: Uuid) -> Result<MessageResponse, SyncError> {
        let response = self
            .client
            .delete(self.endpoint(&format!("/habits/{habit_id}"))?)
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode(response, "failed to delete habit").await
    }

    async fn list_completions(&self, habit_id: Uuid) -> Result<Vec<Completion>, SyncError> {
        let response = self
            .client
            .get(self.endpoint(&format!("/habits/{habit_id}/completions/"))?)
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode(response, "failed to load completions").await
    }

    async fn load_analytics(&self) -> Result<AnalyticsReport, SyncError> {
        let response = self
            .client
            .get(self.endpoint("/analytics/")?)
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode(response, "failed to load analytics").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_resolve_against_the_base_url() {
        let api = HttpHabitApi::new("http://localhost:8000").unwrap();
        assert_eq!(
            api.endpoint("/habits/").unwrap().as_str(),
            "http://localhost:8000/habits/"
        );

        let id = Uuid::nil();
        assert_eq!(
            api.endpoint(&format!("/habits/{id}/completions/"))
                .unwrap()
                .as_str(),
            "http://localhost:8000/habits/00000000-0000-0000-0000-000000000000/completions/"
        );
    }

    #[test]
    fn a_bad_base_url_is_rejected_up_front() {
        assert!(matches!(
            HttpHabitApi::new("not a url"),
            Err(SyncError::Unexpected(_))
        ));
    }
}
