//! Bearer token signing and verification.
//!
//! Tokens are stateless HS256 JWTs carrying the user id and a fixed 30-day
//! expiry. There is no revocation list; a token is valid until it expires.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use boutique_core::UserId;

/// Fixed token lifetime.
pub const TOKEN_TTL_DAYS: i64 = 30;

/// Errors from token operations.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing failed (should not happen with a valid secret).
    #[error("failed to sign token")]
    Sign,

    /// The token is malformed, has a bad signature, or is expired.
    #[error("invalid token")]
    Invalid,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id as a string.
    sub: String,
    /// Expiry as a unix timestamp.
    exp: usize,
}

/// Sign a token embedding the user id.
///
/// # Errors
///
/// Returns `TokenError::Sign` if encoding fails.
pub fn issue(secret: &SecretString, user_id: UserId) -> Result<String, TokenError> {
    let exp = Utc::now() + Duration::days(TOKEN_TTL_DAYS);
    let claims = Claims {
        sub: user_id.to_string(),
        exp: usize::try_from(exp.timestamp()).map_err(|_| TokenError::Sign)?,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|_| TokenError::Sign)
}

/// Verify a token and extract the user id it asserts.
///
/// # Errors
///
/// Returns `TokenError::Invalid` if the token is malformed, expired, or was
/// not signed with this secret.
pub fn verify(secret: &SecretString, token: &str) -> Result<UserId, TokenError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| TokenError::Invalid)?;

    let id: i32 = data.claims.sub.parse().map_err(|_| TokenError::Invalid)?;
    Ok(UserId::new(id))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("kX9#mP2$vL8@qR5^wT3&nB7*zD4!hF6j")
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let token = issue(&secret(), UserId::new(42)).unwrap();
        let user_id = verify(&secret(), &token).unwrap();
        assert_eq!(user_id, UserId::new(42));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = issue(&secret(), UserId::new(1)).unwrap();
        let other = SecretString::from("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6d");
        assert!(matches!(verify(&other, &token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(matches!(
            verify(&secret(), "not-a-token"),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_token_carries_thirty_day_expiry() {
        let token = issue(&secret(), UserId::new(7)).unwrap();

        // Decode without expiry validation to inspect the claim directly.
        let mut validation = Validation::default();
        validation.validate_exp = false;
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(secret().expose_secret().as_bytes()),
            &validation,
        )
        .unwrap();

        let expected = (Utc::now() + Duration::days(TOKEN_TTL_DAYS)).timestamp();
        let actual = i64::try_from(data.claims.exp).unwrap();
        // Allow a few seconds of slack for test execution time.
        assert!((expected - actual).abs() < 5);
    }
}
