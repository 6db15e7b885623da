//! Error types for gradebook-server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid bind address: {0}")]
    Addr(#[from] std::net::AddrParseError),
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = err {
            // Constraint violations become client-facing conflicts
            match db.code().as_deref() {
                // unique_violation
                Some("23505") => {
                    let message = match db.constraint() {
                        Some("students_email_key") => "email already in use".to_string(),
                        _ => format!("duplicate value: {}", db.message()),
                    };
                    return Error::Conflict(message);
                }
                // foreign_key_violation
                Some("23503") => {
                    let message = match db.constraint() {
                        Some("scores_student_id_fkey") => {
                            "score references a student that does not exist".to_string()
                        }
                        _ => format!("referenced record does not exist: {}", db.message()),
                    };
                    return Error::Conflict(message);
                }
                _ => {}
            }
        }
        Error::Database(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            Error::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            // Uniqueness and referential conflicts surface as 400 to callers.
            Error::Conflict(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::Config(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            Error::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            Error::Io(e) => {
                tracing::error!("IO error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("IO error: {}", e))
            }
            Error::Addr(e) => {
                tracing::error!("Invalid bind address: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "detail": detail,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}
