//! Rolling-window completion analytics.
//!
//! Recomputed in full on every request. At personal-tracker scale the habit
//! set and completion log are small, so a single pass over both is cheap and
//! keeps the server free of caching or incremental bookkeeping.

use chrono::{Duration, NaiveDate};

use crate::models::analytics::{AnalyticsReport, CompletionRate, HabitStats, TotalStats};
use crate::models::completion::Completion;
use crate::models::habit::{Frequency, Habit};

/// Trailing lookback for per-habit completion rates.
pub const WINDOW_DAYS: i64 = 30;

/// Build the analytics report for a habit set and its completion log.
///
/// Per habit: days inside the trailing window (inclusive of the cutoff day)
/// that were recorded as resisted, and that count as a percentage of the
/// window length, rounded to one decimal. Records for habits not in `habits`
/// are ignored.
pub fn aggregate(
    habits: &[Habit],
    log: &[Completion],
    today: NaiveDate,
    window_days: i64,
) -> AnalyticsReport {
    let cutoff = today - Duration::days(window_days);

    let habit_stats = habits
        .iter()
        .map(|habit| {
            let completed_count = log
                .iter()
                .filter(|c| c.habit_id == habit.id && c.completed && c.completion_date >= cutoff)
                .count() as i64;
            HabitStats {
                habit_id: habit.id,
                habit_name: habit.name.clone(),
                completed_count,
                completion_rate: completion_rate(completed_count, window_days),
            }
        })
        .collect();

    let mut total_stats = TotalStats {
        total_habits: habits.len() as i64,
        ..TotalStats::default()
    };
    for habit in habits {
        match habit.frequency {
            Frequency::Daily => total_stats.daily_habits += 1,
            Frequency::Weekly => total_stats.weekly_habits += 1,
            Frequency::Monthly => total_stats.monthly_habits += 1,
        }
    }

    AnalyticsReport {
        habit_stats,
        total_stats,
    }
}

/// Share of window days with a resisted entry, as a one-decimal percentage.
/// No qualifying records yields the exact zero, never a rounding artifact.
fn completion_rate(completed_count: i64, window_days: i64) -> CompletionRate {
    if completed_count == 0 {
        return CompletionRate(0.0);
    }
    let percent = completed_count as f64 * 100.0 / window_days as f64;
    CompletionRate((percent * 10.0).round() / 10.0)
}
