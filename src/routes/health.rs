use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::Result;

pub async fn health(State(state): State<AppState>) -> Result<Json<Value>> {
    state.storage.ping().await?;
    Ok(Json(json!({ "status": "ok" })))
}
