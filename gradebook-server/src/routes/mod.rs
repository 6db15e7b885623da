//! Route handlers for gradebook-server
//!
//! Organized by resource type:
//! - students: student records (aggregate root for scores)
//! - scores: score records owned by students
//! - health: liveness probe

pub mod health;
pub mod scores;
pub mod students;
