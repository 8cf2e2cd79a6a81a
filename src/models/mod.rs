use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod analytics;
pub mod completion;
pub mod habit;

/// Standard success message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response for habit creation: the generated id plus a confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitCreated {
    pub id: Uuid,
    pub message: String,
}
