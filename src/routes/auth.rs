use axum::{extract::State, http::StatusCode, Json};
use tower_sessions::Session;

use crate::app::AppState;
use crate::auth::{sign_out, AuthUser};
use crate::entity::User;
use crate::error::{AppError, Result};

/// `GET /api/auth/user`
pub async fn current_user(State(state): State<AppState>, auth: AuthUser) -> Result<Json<User>> {
    state
        .storage
        .get_user(&auth.id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("User"))
}

/// `GET /api/logout`
pub async fn logout(session: Session) -> Result<StatusCode> {
    sign_out(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}
