//! Startup schema for the gradebook tables
//!
//! Idempotent: every statement is IF NOT EXISTS, so running at each boot
//! is safe. Deleting a student cascades to its scores.

use sqlx::PgPool;

use crate::error::Result;

/// Create the gradebook tables and indexes.
pub async fn run(pool: &PgPool) -> Result<()> {
    tracing::info!("Running gradebook migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id SERIAL PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS scores (
            id SERIAL PRIMARY KEY,
            score INTEGER NOT NULL,
            student_id INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Gradebook migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<()> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_students_email ON students(email)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_scores_student ON scores(student_id)")
        .execute(pool)
        .await?;

    Ok(())
}
