//! Database-backed integration tests for the Boutique workspace.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL and apply migrations
//! cargo run -p boutique-cli -- migrate
//!
//! # Run the ignored, database-bound tests
//! DATABASE_URL=postgres://localhost/boutique \
//!     cargo test -p boutique-integration-tests -- --ignored
//! ```
//!
//! Every test registers its own throwaway user with a unique email, so the
//! suite can run repeatedly against a database that already holds data.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use secrecy::SecretString;
use sqlx::PgPool;

use boutique_api::db;
use boutique_api::models::{Product, User};
use boutique_api::services::catalog::NewProduct;
use boutique_api::services::{AuthService, CatalogService};

static EMAIL_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Connect using `BOUTIQUE_DATABASE_URL` or `DATABASE_URL`.
///
/// # Panics
///
/// Panics when neither variable is set or the database is unreachable;
/// these tests cannot run without one.
pub async fn test_pool() -> PgPool {
    let url = std::env::var("BOUTIQUE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("set DATABASE_URL to run database-bound tests");

    db::create_pool(&SecretString::from(url))
        .await
        .expect("Failed to connect to test database")
}

/// Signing secret for tokens issued during tests.
#[must_use]
pub fn test_jwt_secret() -> SecretString {
    SecretString::from("integration-test-signing-secret-0123456789abcdef")
}

/// An email address no other test run will have used.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before Unix epoch")
        .as_nanos();
    let n = EMAIL_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{nanos}-{n}@example.com")
}

/// Register a fresh non-admin user for the calling test.
///
/// # Panics
///
/// Panics if registration fails; the fixture is a test precondition.
pub async fn register_user(pool: &PgPool, prefix: &str) -> User {
    let secret = test_jwt_secret();
    let auth = AuthService::new(pool, &secret);
    let (user, _token) = auth
        .register("Test Shopper", &unique_email(prefix), "password123")
        .await
        .expect("Failed to register test user");
    user
}

/// Create a catalog product for the calling test.
///
/// # Panics
///
/// Panics if creation fails; the fixture is a test precondition.
pub async fn create_product(pool: &PgPool, name: &str, price: &str, stock: i32) -> Product {
    CatalogService::new(pool)
        .create(&NewProduct {
            name: name.to_string(),
            description: "Fixture product".to_string(),
            price: price.parse().expect("price literal"),
            count_in_stock: stock,
            image_url: "/assets/fixture.jpg".to_string(),
            category: "Fixtures".to_string(),
        })
        .await
        .expect("Failed to create test product")
}
