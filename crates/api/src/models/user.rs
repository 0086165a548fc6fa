//! User domain type.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use boutique_core::{Email, UserId};

/// A registered user.
///
/// The password hash is deliberately not part of this type; repositories
/// return it separately to the one code path that verifies it.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address (unique across users).
    pub email: Email,
    /// Whether the user may call admin routes.
    pub is_admin: bool,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}
