//! Per-user favorites. Every route here requires a signed-in session.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::app::AppState;
use crate::auth::AuthUser;
use crate::entity::{Content, Favorite};
use crate::error::{AppError, Result};
use crate::routes::path_id;
use crate::schema::NewFavorite;

pub async fn list_favorites(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Content>>> {
    Ok(Json(state.storage.get_user_favorites(&auth.id).await?))
}

pub async fn add_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    body: std::result::Result<Json<NewFavorite>, JsonRejection>,
) -> Result<(StatusCode, Json<Favorite>)> {
    let Json(body) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    body.validate()
        .map_err(|errors| AppError::validation("favorite", errors))?;

    if state
        .storage
        .get_content_by_id(body.content_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Content"));
    }

    let favorite = state
        .storage
        .add_to_favorites(&auth.id, body.content_id)
        .await?;

    Ok((StatusCode::CREATED, Json(favorite)))
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    path: std::result::Result<Path<i32>, PathRejection>,
) -> Result<StatusCode> {
    let content_id = path_id(path)?;
    state
        .storage
        .remove_from_favorites(&auth.id, content_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn check_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    path: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>> {
    let content_id = path_id(path)?;
    let is_favorite = state.storage.is_favorite(&auth.id, content_id).await?;
    Ok(Json(json!({ "isFavorite": is_favorite })))
}
