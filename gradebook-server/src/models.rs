//! Gradebook data models
//!
//! Two entities:
//! - Students: the aggregate root, identified by a unique email
//! - Scores: owned by exactly one student via `student_id`
//!
//! Create/Update payload structs mirror the columns a caller may supply;
//! update payloads are all-optional so that PATCH applies only the fields
//! present in the request body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// Students
// ============================================================================

/// A student record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all students
    pub email: String,
    pub created_at: DateTime<Utc>,
    /// Null until the record is first updated
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStudent {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

// ============================================================================
// Scores
// ============================================================================

/// A score record owned by a single student
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Score {
    pub id: i32,
    pub score: i32,
    pub student_id: i32,
    pub created_at: DateTime<Utc>,
    /// Null until the record is first updated
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScore {
    pub score: i32,
    pub student_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateScore {
    pub score: Option<i32>,
    pub student_id: Option<i32>,
}

// ============================================================================
// Response types
// ============================================================================

/// Student with its eagerly-loaded scores collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentWithScores {
    #[serde(flatten)]
    pub student: Student,
    pub scores: Vec<Score>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_student_accepts_partial_payload() {
        let update: UpdateStudent = serde_json::from_str(r#"{"last_name": "X"}"#).unwrap();

        assert_eq!(update.last_name.as_deref(), Some("X"));
        assert!(update.first_name.is_none());
        assert!(update.email.is_none());
    }

    #[test]
    fn update_student_accepts_empty_payload() {
        let update: UpdateStudent = serde_json::from_str("{}").unwrap();

        assert!(update.first_name.is_none());
        assert!(update.last_name.is_none());
        assert!(update.email.is_none());
    }

    #[test]
    fn update_score_accepts_partial_payload() {
        let update: UpdateScore = serde_json::from_str(r#"{"score": 95}"#).unwrap();

        assert_eq!(update.score, Some(95));
        assert!(update.student_id.is_none());
    }

    #[test]
    fn student_with_scores_flattens_student_fields() {
        let aggregate = StudentWithScores {
            student: Student {
                id: 1,
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                created_at: Utc::now(),
                updated_at: None,
            },
            scores: vec![],
        };

        let value = serde_json::to_value(&aggregate).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["email"], "ada@example.com");
        assert!(value["scores"].as_array().unwrap().is_empty());
        // Flattened: no nested "student" object in the payload
        assert!(value.get("student").is_none());
    }
}
