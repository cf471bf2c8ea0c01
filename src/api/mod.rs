// API module - HTTP endpoints

use axum::{extract::FromRef, routing::get, Router};
use sqlx::PgPool;

pub mod admin_users;
pub mod health;
pub mod middleware;
pub mod pages;
pub mod response;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: crate::config::Config,
}

impl FromRef<AppState> for PgPool {
    fn from_ref(state: &AppState) -> PgPool {
        state.pool.clone()
    }
}

/// Builds the application router. Kept out of main so integration tests can
/// run requests against the exact production routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(pages::router())
        .merge(admin_users::router(state.config.enable_user_listing))
        .with_state(state)
}
