//! Public catalog reads.

use axum::{
    extract::{rejection::PathRejection, rejection::QueryRejection, Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};

use crate::app::AppState;
use crate::entity::{Content, Episode};
use crate::error::{AppError, Result};
use crate::routes::path_id;
use crate::schema::{ContentListing, ContentQuery};

/// `GET /api/content`
///
/// `featured=true` answers with a single item (or `null`); every other
/// listing answers with an array.
pub async fn list_content(
    State(state): State<AppState>,
    query: std::result::Result<Query<ContentQuery>, QueryRejection>,
) -> Result<Response> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let storage = &state.storage;

    let listing = query
        .listing()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let items: Vec<Content> = match listing {
        ContentListing::Featured => {
            return Ok(Json(storage.get_featured_content().await?).into_response());
        }
        ContentListing::Popular => storage.get_popular_content().await?,
        ContentListing::New => storage.get_new_content().await?,
        ContentListing::Search(q) => storage.search_content(&q).await?,
        ContentListing::ByType(content_type) => storage.get_content_by_type(content_type).await?,
        ContentListing::All => storage.get_all_content().await?,
    };

    Ok(Json(items).into_response())
}

/// `GET /api/content/{id}`
///
/// Counts a view on every successful read. The body reflects the row as it
/// was before the increment.
pub async fn get_content(
    State(state): State<AppState>,
    path: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<Content>> {
    let id = path_id(path)?;
    let content = state
        .storage
        .get_content_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Content"))?;

    state.storage.increment_view_count(id).await?;

    Ok(Json(content))
}

/// `GET /api/content/{id}/episodes`
pub async fn list_episodes(
    State(state): State<AppState>,
    path: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<Episode>>> {
    let id = path_id(path)?;
    Ok(Json(state.storage.get_episodes_by_content_id(id).await?))
}
