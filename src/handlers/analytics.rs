use axum::{extract::State, Json};
use chrono::Utc;

use crate::error::AppResult;
use crate::models::analytics::AnalyticsReport;
use crate::models::completion::Completion;
use crate::models::habit::Habit;
use crate::services::analytics::{aggregate, WINDOW_DAYS};
use crate::AppState;

pub async fn get_analytics(State(state): State<AppState>) -> AppResult<Json<AnalyticsReport>> {
    let habits = sqlx::query_as::<_, Habit>("SELECT * FROM habits")
        .fetch_all(&state.db)
        .await?;

    let log = sqlx::query_as::<_, Completion>("SELECT * FROM habit_completions")
        .fetch_all(&state.db)
        .await?;

    let today = Utc::now().date_naive();
    Ok(Json(aggregate(&habits, &log, today, WINDOW_DAYS)))
}
