use axum::{extract::State, Json};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::completion::CompletionEntry;
use crate::models::MessageResponse;
use crate::AppState;

pub async fn record_completion(
    State(state): State<AppState>,
    Json(entry): Json<CompletionEntry>,
) -> AppResult<Json<MessageResponse>> {
    entry
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    // Verify the habit exists so an unknown id reports 404 rather than a
    // foreign-key failure.
    let known = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM habits WHERE id = $1")
        .bind(entry.habit_id)
        .fetch_one(&state.db)
        .await?;
    if known == 0 {
        return Err(AppError::NotFound("Habit not found".into()));
    }

    let mut tx = state.db.begin().await?;
    sqlx::query(
        r#"
        INSERT INTO habit_completions (id, habit_id, completion_date, completed, notes, craving_level, resistance_level)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (habit_id, completion_date) DO UPDATE SET
            completed = EXCLUDED.completed,
            notes = EXCLUDED.notes,
            craving_level = EXCLUDED.craving_level,
            resistance_level = EXCLUDED.resistance_level
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(entry.habit_id)
    .bind(entry.completion_date)
    .bind(entry.completed)
    .bind(&entry.notes)
    .bind(entry.craving_level)
    .bind(entry.resistance_level)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    tracing::debug!(
        habit_id = %entry.habit_id,
        date = %entry.completion_date,
        completed = entry.completed,
        "completion recorded"
    );

    Ok(Json(MessageResponse {
        message: "Habit completion recorded".into(),
    }))
}
