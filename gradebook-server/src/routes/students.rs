//! Student routes - aggregate root for score records

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use sqlx::PgPool;

use crate::error::{Error, Result};
use crate::models::{CreateStudent, Score, Student, StudentWithScores, UpdateStudent};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_student)).route(
        "/{id}",
        get(get_student).patch(update_student).delete(delete_student),
    )
}

/// POST /student - Create a student
///
/// A duplicate email trips the unique constraint and surfaces as Conflict.
pub async fn create_student(
    State(state): State<AppState>,
    Json(input): Json<CreateStudent>,
) -> Result<Json<Student>> {
    let student: Student = sqlx::query_as(
        r#"
        INSERT INTO students (first_name, last_name, email)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(&input.first_name)
    .bind(&input.last_name)
    .bind(&input.email)
    .fetch_one(state.pool())
    .await?;

    Ok(Json(student))
}

/// GET /student/{id} - Student with its eagerly-loaded scores
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StudentWithScores>> {
    let student: Student = sqlx::query_as("SELECT * FROM students WHERE id = $1")
        .bind(id)
        .fetch_optional(state.pool())
        .await?
        .ok_or_else(|| Error::NotFound(format!("Student {} not found", id)))?;

    let scores = scores_for(state.pool(), student.id).await?;

    Ok(Json(StudentWithScores { student, scores }))
}

/// PATCH /student/{id} - Partial update; only supplied fields change
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateStudent>,
) -> Result<Json<StudentWithScores>> {
    let student: Student = sqlx::query_as(
        r#"
        UPDATE students SET
            first_name = COALESCE($2, first_name),
            last_name = COALESCE($3, last_name),
            email = COALESCE($4, email),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&input.first_name)
    .bind(&input.last_name)
    .bind(&input.email)
    .fetch_optional(state.pool())
    .await?
    .ok_or_else(|| Error::NotFound(format!("Student {} not found", id)))?;

    let scores = scores_for(state.pool(), student.id).await?;

    Ok(Json(StudentWithScores { student, scores }))
}

/// DELETE /student/{id} - Remove the student and, by cascade, its scores
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM students WHERE id = $1")
        .bind(id)
        .execute(state.pool())
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Student {} not found", id)));
    }

    Ok(Json(
        serde_json::json!({ "detail": format!("Student {} deleted", id) }),
    ))
}

/// Owning-side query resolving a student's scores collection
pub(crate) async fn scores_for(pool: &PgPool, student_id: i32) -> Result<Vec<Score>> {
    let scores = sqlx::query_as("SELECT * FROM scores WHERE student_id = $1 ORDER BY id")
        .bind(student_id)
        .fetch_all(pool)
        .await?;

    Ok(scores)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::testutil::{request, test_app, unique_email};

    // Integration tests - run with DATABASE_URL set:
    // DATABASE_URL=postgres://... cargo test -p gradebook-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_read_round_trip() {
        let app = test_app().await;
        let email = unique_email("roundtrip");

        let (status, created) = request(
            &app,
            "POST",
            "/student",
            Some(json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": email,
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["first_name"], "Ada");
        assert_eq!(created["last_name"], "Lovelace");
        assert_eq!(created["email"], email.as_str());
        assert!(created["id"].is_i64());
        assert!(created["created_at"].is_string());
        assert!(created["updated_at"].is_null());

        let id = created["id"].as_i64().unwrap();
        let (status, fetched) = request(&app, "GET", &format!("/student/{}", id), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["first_name"], created["first_name"]);
        assert_eq!(fetched["last_name"], created["last_name"]);
        assert_eq!(fetched["email"], created["email"]);
        assert_eq!(fetched["created_at"], created["created_at"]);
        // A just-created student owns no scores yet
        assert_eq!(fetched["scores"], json!([]));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_email_is_rejected() {
        let app = test_app().await;
        let email = unique_email("duplicate");
        let payload = json!({
            "first_name": "Grace",
            "last_name": "Hopper",
            "email": email,
        });

        let (status, _) = request(&app, "POST", "/student", Some(payload.clone())).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = request(&app, "POST", "/student", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .contains("email already in use"));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn partial_update_changes_only_supplied_fields() {
        let app = test_app().await;
        let email = unique_email("partial");

        let (_, created) = request(
            &app,
            "POST",
            "/student",
            Some(json!({
                "first_name": "Alan",
                "last_name": "Turing",
                "email": email,
            })),
        )
        .await;
        let id = created["id"].as_i64().unwrap();

        let (status, updated) = request(
            &app,
            "PATCH",
            &format!("/student/{}", id),
            Some(json!({ "last_name": "X" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["last_name"], "X");
        assert_eq!(updated["first_name"], "Alan");
        assert_eq!(updated["email"], email.as_str());
        assert!(updated["updated_at"].is_string());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_missing_student_is_not_found() {
        let app = test_app().await;

        // id 0 is never assigned by SERIAL
        let (status, body) = request(
            &app,
            "PATCH",
            "/student/0",
            Some(json!({ "first_name": "Nobody" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["detail"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_then_read_is_not_found_and_delete_is_not_idempotent() {
        let app = test_app().await;
        let email = unique_email("delete");

        let (_, created) = request(
            &app,
            "POST",
            "/student",
            Some(json!({
                "first_name": "Katherine",
                "last_name": "Johnson",
                "email": email,
            })),
        )
        .await;
        let id = created["id"].as_i64().unwrap();

        let (status, body) = request(&app, "DELETE", &format!("/student/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["detail"].as_str().unwrap().contains("deleted"));

        let (status, _) = request(&app, "GET", &format!("/student/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // Second delete reports NotFound, not success
        let (status, _) = request(&app, "DELETE", &format!("/student/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn deleting_student_removes_owned_scores() {
        let app = test_app().await;
        let email = unique_email("cascade");

        let (_, created) = request(
            &app,
            "POST",
            "/student",
            Some(json!({
                "first_name": "Edsger",
                "last_name": "Dijkstra",
                "email": email,
            })),
        )
        .await;
        let student_id = created["id"].as_i64().unwrap();

        let (_, score) = request(
            &app,
            "POST",
            "/score",
            Some(json!({ "score": 88, "student_id": student_id })),
        )
        .await;
        let score_id = score["id"].as_i64().unwrap();

        let (status, _) = request(&app, "DELETE", &format!("/student/{}", student_id), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = request(&app, "GET", &format!("/score/{}", score_id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
