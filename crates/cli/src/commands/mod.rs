//! CLI command implementations.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;

/// Resolve the database URL the same way the API server does:
/// `BOUTIQUE_DATABASE_URL` first, generic `DATABASE_URL` as fallback.
pub(crate) fn database_url() -> Result<SecretString, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    std::env::var("BOUTIQUE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "BOUTIQUE_DATABASE_URL not set".into())
}
