//! Score routes - records owned by a single student

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::error::{Error, Result};
use crate::models::{CreateScore, Score, UpdateScore};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_score)).route(
        "/{id}",
        get(get_score).patch(update_score).delete(delete_score),
    )
}

/// POST /score - Create a score for an existing student
///
/// A `student_id` referencing no student trips the foreign key and
/// surfaces as Conflict.
pub async fn create_score(
    State(state): State<AppState>,
    Json(input): Json<CreateScore>,
) -> Result<Json<Score>> {
    let score: Score = sqlx::query_as(
        r#"
        INSERT INTO scores (score, student_id)
        VALUES ($1, $2)
        RETURNING *
        "#,
    )
    .bind(input.score)
    .bind(input.student_id)
    .fetch_one(state.pool())
    .await?;

    Ok(Json(score))
}

/// GET /score/{id} - Read a score
pub async fn get_score(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Score>> {
    let score: Score = sqlx::query_as("SELECT * FROM scores WHERE id = $1")
        .bind(id)
        .fetch_optional(state.pool())
        .await?
        .ok_or_else(|| Error::NotFound(format!("Score {} not found", id)))?;

    Ok(Json(score))
}

/// PATCH /score/{id} - Partial update; only supplied fields change
///
/// NotFound is keyed on the id lookup alone: an empty payload against an
/// existing record succeeds, a populated payload against a missing id
/// does not.
pub async fn update_score(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateScore>,
) -> Result<Json<Score>> {
    let score: Score = sqlx::query_as(
        r#"
        UPDATE scores SET
            score = COALESCE($2, score),
            student_id = COALESCE($3, student_id),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(input.score)
    .bind(input.student_id)
    .fetch_optional(state.pool())
    .await?
    .ok_or_else(|| Error::NotFound(format!("Score {} not found", id)))?;

    Ok(Json(score))
}

/// DELETE /score/{id} - Remove a score
pub async fn delete_score(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM scores WHERE id = $1")
        .bind(id)
        .execute(state.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Score {} not found", id)));
    }

    Ok(Json(
        serde_json::json!({ "detail": format!("Score {} deleted", id) }),
    ))
}
