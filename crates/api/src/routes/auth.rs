//! Auth route handlers: register, login, profile.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use boutique_core::{Email, UserId};

use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::User;
use crate::services::AuthService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User details returned by auth endpoints. `token` is present on
/// register/login and absent on profile reads.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub is_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl UserResponse {
    fn from_user(user: User, token: Option<String>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            is_admin: user.is_admin,
            token,
        }
    }
}

/// `POST /api/auth/register`
#[instrument(skip_all, fields(email = %payload.email))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let service = AuthService::new(state.pool(), &state.config().jwt_secret);
    let (user, token) = service
        .register(&payload.name, &payload.email, &payload.password)
        .await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(UserResponse::from_user(user, Some(token))),
    ))
}

/// `POST /api/auth/login`
#[instrument(skip_all, fields(email = %payload.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let service = AuthService::new(state.pool(), &state.config().jwt_secret);
    let (user, token) = service.login(&payload.email, &payload.password).await?;

    Ok(Json(UserResponse::from_user(user, Some(token))))
}

/// `GET /api/auth/profile`
///
/// Re-reads the user row rather than echoing the extractor's copy, so a
/// concurrent deletion shows up as 404 here rather than stale data.
pub async fn profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<UserResponse>, AppError> {
    let service = AuthService::new(state.pool(), &state.config().jwt_secret);
    let user = service
        .get_user(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse::from_user(user, None)))
}
