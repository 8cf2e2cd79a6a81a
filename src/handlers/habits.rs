use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::completion::Completion;
use crate::models::habit::{Habit, NewHabit};
use crate::models::{HabitCreated, MessageResponse};
use crate::AppState;

pub async fn list_habits(State(state): State<AppState>) -> AppResult<Json<Vec<Habit>>> {
    let habits = sqlx::query_as::<_, Habit>("SELECT * FROM habits ORDER BY created_at DESC")
        .fetch_all(&state.db)
        .await?;

    Ok(Json(habits))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(body): Json<NewHabit>,
) -> AppResult<Json<HabitCreated>> {
    if body.name.trim().is_empty() {
        return Err(AppError::Validation("Habit name is required".into()));
    }
    if body.target_count < 1 {
        return Err(AppError::Validation("Target count must be positive".into()));
    }

    let id = Uuid::new_v4();
    let mut tx = state.db.begin().await?;
    sqlx::query(
        r#"
        INSERT INTO habits (id, name, description, habit_type, frequency, target_count, motivation_text, difficulty_level)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(id)
    .bind(body.name.trim())
    .bind(&body.description)
    .bind(&body.habit_type)
    .bind(body.frequency)
    .bind(body.target_count)
    .bind(&body.motivation_text)
    .bind(body.difficulty_level)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    tracing::debug!(habit_id = %id, "habit created");

    Ok(Json(HabitCreated {
        id,
        message: "Habit created successfully".into(),
    }))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    let mut tx = state.db.begin().await?;
    let result = sqlx::query("DELETE FROM habits WHERE id = $1")
        .bind(habit_id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Habit not found".into()));
    }
    tx.commit().await?;

    tracing::debug!(habit_id = %habit_id, "habit deleted");

    Ok(Json(MessageResponse {
        message: "Habit deleted successfully".into(),
    }))
}

/// The ten most recent completion records for one habit, newest first.
/// An unknown habit id simply yields an empty list.
pub async fn list_completions(
    State(state): State<AppState>,
    Path(habit_id): Path<Uuid>,
) -> AppResult<Json<Vec<Completion>>> {
    let completions = sqlx::query_as::<_, Completion>(
        r#"
        SELECT * FROM habit_completions
        WHERE habit_id = $1
        ORDER BY completion_date DESC
        LIMIT 10
        "#,
    )
    .bind(habit_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(completions))
}
