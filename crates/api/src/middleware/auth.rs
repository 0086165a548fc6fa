//! Authentication extractors.
//!
//! Every protected route takes one of these as an argument. A bearer token
//! from the `Authorization` header is verified against the configured
//! signing secret, then the user row is loaded so handlers never work from
//! token claims alone (a deleted user's token stops working immediately).

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::db::UserRepository;
use crate::error::AppError;
use crate::models::User;
use crate::services::auth::token;
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn profile(CurrentUser(user): CurrentUser) -> impl IntoResponse {
///     Json(user)
/// }
/// ```
pub struct CurrentUser(pub User);

/// Extractor that requires a valid bearer token for an admin user.
///
/// Rejects with 401 for missing/invalid tokens and 403 for a valid token
/// belonging to a non-admin user.
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("Not authorized, no token".to_string()))?;

        let user_id = token::verify(&state.config().jwt_secret, token)
            .map_err(|_| AppError::Unauthorized("Not authorized, token failed".to_string()))?;

        let user = UserRepository::new(state.pool())
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Not authorized, token failed".to_string()))?;

        Ok(Self(user))
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if !user.is_admin {
            return Err(AppError::Forbidden(
                "Not authorized as an admin".to_string(),
            ));
        }

        Ok(Self(user))
    }
}

/// Extract the bearer token from the `Authorization` header, if any.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: &str) -> Parts {
        let (parts, ()) = Request::builder()
            .header(header::AUTHORIZATION, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_extracted() {
        let parts = parts_with_auth("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let parts = parts_with_auth("Basic dXNlcjpwdw==");
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_bearer_token_missing_header() {
        let (parts, ()) = Request::builder().body(()).unwrap().into_parts();
        assert_eq!(bearer_token(&parts), None);
    }
}
