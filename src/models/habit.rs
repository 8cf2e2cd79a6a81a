use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Habit {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub habit_type: String,
    pub frequency: Frequency,
    pub target_count: i32,
    pub motivation_text: Option<String>,
    pub difficulty_level: Difficulty,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "habit_frequency", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Default for Frequency {
    fn default() -> Self {
        Self::Daily
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "habit_difficulty", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

/// Body of `POST /habits/`. Everything but the name can be omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHabit {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_habit_type")]
    pub habit_type: String,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default = "default_target_count")]
    pub target_count: i32,
    #[serde(default)]
    pub motivation_text: Option<String>,
    #[serde(default)]
    pub difficulty_level: Difficulty,
}

fn default_habit_type() -> String {
    "bad".to_string()
}

fn default_target_count() -> i32 {
    1
}

impl NewHabit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            habit_type: default_habit_type(),
            frequency: Frequency::default(),
            target_count: default_target_count(),
            motivation_text: None,
            difficulty_level: Difficulty::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_habit_fills_defaults_for_omitted_fields() {
        let draft: NewHabit = serde_json::from_str(r#"{"name": "Smoking"}"#).unwrap();
        assert_eq!(draft.name, "Smoking");
        assert_eq!(draft.habit_type, "bad");
        assert_eq!(draft.frequency, Frequency::Daily);
        assert_eq!(draft.target_count, 1);
        assert_eq!(draft.difficulty_level, Difficulty::Medium);
        assert!(draft.description.is_none());
        assert!(draft.motivation_text.is_none());
    }

    #[test]
    fn frequency_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Frequency::Weekly).unwrap(),
            r#""weekly""#
        );
        assert_eq!(
            serde_json::from_str::<Difficulty>(r#""hard""#).unwrap(),
            Difficulty::Hard
        );
    }
}
