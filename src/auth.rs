//! Session-based identity and the admin password gate.
//!
//! The identity provider itself is external. Its callback hands verified
//! claims to [`sign_in`], which records the user and binds the user id to the
//! current session; [`AuthUser`] reads it back on protected routes.

use axum::{
    body::Bytes,
    extract::FromRequestParts,
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use tower_sessions::Session;
use validator::Validate;

use crate::app::AppState;
use crate::entity::User;
use crate::error::{AppError, Result};
use crate::schema::{AdminPassword, UpsertUser};
use crate::storage::Storage;

/// Session key holding the signed-in user's id.
pub const USER_ID_KEY: &str = "user_id";

/// The signed-in user's id, extracted from the session.
///
/// Rejects with 401 when the request carries no authenticated session.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Unauthorized)?;

        match session.get::<String>(USER_ID_KEY).await? {
            Some(id) => Ok(Self { id }),
            None => Err(AppError::Unauthorized),
        }
    }
}

/// Records the user described by `claims` and binds them to `session`.
///
/// The session id is cycled first so a pre-login id cannot be reused.
pub async fn sign_in(session: &Session, storage: &dyn Storage, claims: UpsertUser) -> Result<User> {
    claims
        .validate()
        .map_err(|errors| AppError::validation("user", errors))?;

    let user = storage.upsert_user(claims).await?;
    session.cycle_id().await?;
    session.insert(USER_ID_KEY, &user.id).await?;

    tracing::info!(user_id = %user.id, "user signed in");
    Ok(user)
}

/// Destroys the session and its stored data.
pub async fn sign_out(session: &Session) -> Result<()> {
    session.flush().await?;
    Ok(())
}

/// Returns whether `candidate` matches the configured admin password.
pub fn admin_password_matches(state: &AppState, candidate: &str) -> bool {
    !candidate.is_empty() && candidate == state.admin_password.as_ref()
}

/// Checks the `password` field of an admin request body, then parses the
/// rest of the body into `T` and validates it.
///
/// The password is checked before anything else, so a wrong password is
/// rejected with 401 even when the payload itself is malformed.
pub fn admin_payload<T>(state: &AppState, body: &Bytes, entity: &'static str) -> Result<T>
where
    T: DeserializeOwned + Validate,
{
    let value: serde_json::Value =
        serde_json::from_slice(body).unwrap_or(serde_json::Value::Null);
    let password = value
        .get("password")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default();

    if !admin_password_matches(state, password) {
        tracing::warn!(entity, "admin request with invalid password");
        return Err(AppError::InvalidAdminPassword);
    }

    let payload: T = serde_json::from_value(value)
        .map_err(|e| AppError::BadRequest(format!("Invalid {entity} data: {e}")))?;
    payload
        .validate()
        .map_err(|errors| AppError::validation(entity, errors))?;

    Ok(payload)
}

/// Password check for admin requests that carry no payload.
pub fn require_admin(state: &AppState, body: &Bytes) -> Result<()> {
    admin_payload::<AdminPassword>(state, body, "admin").map(|_| ())
}
