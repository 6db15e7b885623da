//! Application state shared across handlers

use sqlx::PgPool;

/// Shared application state
///
/// Initialized once at startup and injected into each handler by axum;
/// handlers never touch global state. `PgPool` is reference-counted, so
/// the state clones cheaply per request.
#[derive(Clone)]
pub struct AppState {
    pool: PgPool,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
