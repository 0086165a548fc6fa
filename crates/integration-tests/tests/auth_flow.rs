//! Registration and login against a real database.
//!
//! Requires a running `PostgreSQL` database with migrations applied; see
//! the crate docs.

use boutique_api::services::AuthService;
use boutique_api::services::auth::AuthError;
use boutique_integration_tests::{test_jwt_secret, test_pool, unique_email};

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (set DATABASE_URL)"]
async fn test_duplicate_registration_leaves_first_account_intact() {
    let pool = test_pool().await;
    let secret = test_jwt_secret();
    let auth = AuthService::new(&pool, &secret);

    let email = unique_email("dup");
    let (first, _token) = auth
        .register("First Claimant", &email, "password123")
        .await
        .expect("first registration");

    let err = auth
        .register("Second Claimant", &email, "another-password")
        .await
        .expect_err("second registration with the same email must fail");
    assert!(matches!(err, AuthError::UserAlreadyExists));

    // First account still logs in with its original name and password.
    let (logged_in, _token) = auth
        .login(&email, "password123")
        .await
        .expect("original credentials still valid");
    assert_eq!(logged_in.id, first.id);
    assert_eq!(logged_in.name, "First Claimant");
}
