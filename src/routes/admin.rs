//! Catalog administration.
//!
//! Every request re-submits the admin password in its JSON body; there is no
//! admin session. See [`crate::auth::admin_payload`].

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::auth::{admin_password_matches, admin_payload, require_admin};
use crate::entity::{Content, Episode};
use crate::error::{AppError, Result};
use crate::routes::path_id;
use crate::schema::{AdminPassword, ContentChanges, EpisodeChanges, NewContent, NewEpisode};

type IdPath = std::result::Result<Path<i32>, PathRejection>;

/// `POST /api/admin/verify`
pub async fn verify(State(state): State<AppState>, body: Bytes) -> Json<Value> {
    let password = serde_json::from_slice::<AdminPassword>(&body)
        .map(|body| body.password)
        .unwrap_or_default();

    Json(json!({ "success": admin_password_matches(&state, &password) }))
}

pub async fn create_content(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Content>)> {
    let data: NewContent = admin_payload(&state, &body, "content")?;
    let content = state.storage.create_content(data).await?;

    tracing::info!(content_id = content.id, title = %content.title, "content created");
    Ok((StatusCode::CREATED, Json(content)))
}

pub async fn update_content(
    State(state): State<AppState>,
    path: IdPath,
    body: Bytes,
) -> Result<Json<Content>> {
    let changes: ContentChanges = admin_payload(&state, &body, "content")?;
    let id = path_id(path)?;

    state
        .storage
        .update_content(id, changes)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Content"))
}

pub async fn delete_content(
    State(state): State<AppState>,
    path: IdPath,
    body: Bytes,
) -> Result<StatusCode> {
    require_admin(&state, &body)?;
    let id = path_id(path)?;

    state.storage.delete_content(id).await?;
    tracing::info!(content_id = id, "content deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_episode(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Episode>)> {
    let data: NewEpisode = admin_payload(&state, &body, "episode")?;
    let episode = state.storage.create_episode(data).await?;
    Ok((StatusCode::CREATED, Json(episode)))
}

pub async fn update_episode(
    State(state): State<AppState>,
    path: IdPath,
    body: Bytes,
) -> Result<Json<Episode>> {
    let changes: EpisodeChanges = admin_payload(&state, &body, "episode")?;
    let id = path_id(path)?;

    state
        .storage
        .update_episode(id, changes)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Episode"))
}

pub async fn delete_episode(
    State(state): State<AppState>,
    path: IdPath,
    body: Bytes,
) -> Result<StatusCode> {
    require_admin(&state, &body)?;
    let id = path_id(path)?;

    state.storage.delete_episode(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
