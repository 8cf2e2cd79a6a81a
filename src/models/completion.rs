use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Completion {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub completion_date: NaiveDate,
    pub completed: bool,
    pub notes: Option<String>,
    pub craving_level: i16,
    pub resistance_level: i16,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /habits/complete/`. One record per habit per day;
/// resubmitting the same date overwrites the earlier entry.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompletionEntry {
    pub habit_id: Uuid,
    pub completion_date: NaiveDate,
    #[serde(default = "default_completed")]
    pub completed: bool,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = 10, message = "Craving level must be 0-10"))]
    pub craving_level: i16,
    #[serde(default)]
    #[validate(range(min = 0, max = 10, message = "Resistance level must be 0-10"))]
    pub resistance_level: i16,
}

fn default_completed() -> bool {
    true
}

impl CompletionEntry {
    pub fn new(habit_id: Uuid, completion_date: NaiveDate) -> Self {
        Self {
            habit_id,
            completion_date,
            completed: default_completed(),
            notes: None,
            craving_level: 0,
            resistance_level: 0,
        }
    }

    /// Clamp subjective ratings into the 0-10 slider range.
    pub fn clamp_levels(&mut self) {
        self.craving_level = self.craving_level.clamp(0, 10);
        self.resistance_level = self.resistance_level.clamp(0, 10);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_defaults_to_a_resisted_day() {
        let json = r#"{
            "habit_id": "5f8a1c9e-2a64-4b9b-9f1a-0d6f7a3e8b21",
            "completion_date": "2024-01-15"
        }"#;
        let entry: CompletionEntry = serde_json::from_str(json).unwrap();
        assert!(entry.completed);
        assert_eq!(entry.craving_level, 0);
        assert_eq!(entry.resistance_level, 0);
        assert!(entry.notes.is_none());
    }

    #[test]
    fn out_of_range_levels_fail_validation() {
        let mut entry = CompletionEntry::new(Uuid::new_v4(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        entry.craving_level = 11;
        assert!(entry.validate().is_err());

        entry.clamp_levels();
        assert_eq!(entry.craving_level, 10);
        assert!(entry.validate().is_ok());
    }
}
