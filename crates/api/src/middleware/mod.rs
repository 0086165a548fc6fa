//! Request extractors for authentication and authorization.

mod auth;

pub use auth::{CurrentUser, RequireAdmin};
