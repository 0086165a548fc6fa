//! Database operations for the Boutique `PostgreSQL` store.
//!
//! # Tables
//!
//! - `users` - Registration and login identities
//! - `products` - The catalog
//! - `carts` / `cart_items` - One cart per user, one line per product
//! - `orders` / `order_items` - Immutable order snapshots
//!
//! # Concurrency
//!
//! Every cart mutation is a single SQL statement (`ON CONFLICT DO UPDATE`,
//! filtered `UPDATE`/`DELETE`); no repository does fetch-mutate-save, so two
//! overlapping requests for the same user cannot lose each other's writes.
//! Uniqueness invariants (one cart per user, one line per product) live in
//! database constraints, not in application reads.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p boutique-cli -- migrate
//! ```
//! They are never run automatically on server startup.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod carts;
pub mod orders;
pub mod products;
pub mod users;

pub use carts::CartRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The row asked for does not exist.
    #[error("not found")]
    NotFound,

    /// A database constraint rejected the write, such as a duplicate email.
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Open a `PostgreSQL` pool with the house connection settings.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
