//! HTTP routes under `/api`.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::app::AppState;

pub mod admin;
pub mod auth;
pub mod content;
pub mod favorites;
pub mod health;

/// Every API route, without session or tracing layers.
///
/// [`crate::app::build_router`] adds those; tests can merge extra routes
/// first.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/auth/user", get(auth::current_user))
        .route("/api/logout", get(auth::logout))
        .route("/api/content", get(content::list_content))
        .route("/api/content/{id}", get(content::get_content))
        .route("/api/content/{id}/episodes", get(content::list_episodes))
        .route(
            "/api/favorites",
            get(favorites::list_favorites).post(favorites::add_favorite),
        )
        .route(
            "/api/favorites/{content_id}",
            axum::routing::delete(favorites::remove_favorite),
        )
        .route(
            "/api/favorites/{content_id}/check",
            get(favorites::check_favorite),
        )
        .route("/api/admin/verify", post(admin::verify))
        .route("/api/admin/content", post(admin::create_content))
        .route(
            "/api/admin/content/{id}",
            put(admin::update_content).delete(admin::delete_content),
        )
        .route("/api/admin/episodes", post(admin::create_episode))
        .route(
            "/api/admin/episodes/{id}",
            put(admin::update_episode).delete(admin::delete_episode),
        )
}

/// Turns a path extraction failure into a JSON 400.
pub(crate) fn path_id<T>(
    path: Result<axum::extract::Path<T>, axum::extract::rejection::PathRejection>,
) -> crate::error::Result<T> {
    path.map(|axum::extract::Path(id)| id)
        .map_err(|e| crate::error::AppError::BadRequest(e.body_text()))
}
