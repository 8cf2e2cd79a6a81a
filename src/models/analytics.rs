use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// One-decimal completion percentage.
///
/// Zero serializes as the bare integer `0` rather than `0.0`; existing
/// consumers of the analytics payload distinguish the two shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompletionRate(pub f64);

impl Serialize for CompletionRate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.0 == 0.0 {
            serializer.serialize_u64(0)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for CompletionRate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        f64::deserialize(deserializer).map(CompletionRate)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitStats {
    pub habit_id: Uuid,
    pub habit_name: String,
    pub completed_count: i64,
    pub completion_rate: CompletionRate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TotalStats {
    pub total_habits: i64,
    pub daily_habits: i64,
    pub weekly_habits: i64,
    pub monthly_habits: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub habit_stats: Vec<HabitStats>,
    pub total_stats: TotalStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&CompletionRate(0.0)).unwrap(), "0");
        assert_eq!(serde_json::to_string(&CompletionRate(3.3)).unwrap(), "3.3");
        assert_eq!(
            serde_json::to_string(&CompletionRate(100.0)).unwrap(),
            "100.0"
        );
    }

    #[test]
    fn rate_deserializes_from_either_shape() {
        assert_eq!(serde_json::from_str::<CompletionRate>("0").unwrap().0, 0.0);
        assert_eq!(
            serde_json::from_str::<CompletionRate>("6.7").unwrap().0,
            6.7
        );
    }
}
