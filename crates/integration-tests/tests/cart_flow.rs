//! Cart behavior against a real database.
//!
//! These tests exercise the single-statement cart mutations end to end:
//! merge-on-add, idempotent removal, and clearing. They require a running
//! `PostgreSQL` database with migrations applied; see the crate docs.

use boutique_api::services::CartService;
use boutique_integration_tests::{create_product, register_user, test_pool};

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (set DATABASE_URL)"]
async fn test_adding_same_product_twice_merges_into_one_line() {
    let pool = test_pool().await;
    let user = register_user(&pool, "merge").await;
    let product = create_product(&pool, "Montre d'essai", "19.99", 10).await;

    let service = CartService::new(&pool);
    service
        .add_item(user.id, product.id, 2)
        .await
        .expect("first add");
    let cart = service
        .add_item(user.id, product.id, 3)
        .await
        .expect("second add");

    assert_eq!(cart.items.len(), 1);
    let line = cart.items.first().expect("merged line");
    assert_eq!(line.quantity, 5);
    assert_eq!(line.product_id, product.id);
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (set DATABASE_URL)"]
async fn test_removing_an_item_twice_succeeds_silently() {
    let pool = test_pool().await;
    let user = register_user(&pool, "remove").await;
    let product = create_product(&pool, "Sac d'essai", "49.99", 5).await;

    let service = CartService::new(&pool);
    let cart = service
        .add_item(user.id, product.id, 1)
        .await
        .expect("add");
    let item_id = cart.items.first().expect("line").id;

    let after_first = service
        .remove_item(user.id, item_id)
        .await
        .expect("first remove");
    assert!(after_first.items.is_empty());

    // The id is gone now; removing it again is still a success.
    let after_second = service
        .remove_item(user.id, item_id)
        .await
        .expect("second remove");
    assert!(after_second.items.is_empty());
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (set DATABASE_URL)"]
async fn test_clearing_empties_the_cart_but_keeps_the_row() {
    let pool = test_pool().await;
    let user = register_user(&pool, "clear").await;
    let watch = create_product(&pool, "Montre d'essai", "199.99", 10).await;
    let bag = create_product(&pool, "Sac d'essai", "69.99", 10).await;

    let service = CartService::new(&pool);
    service
        .add_item(user.id, watch.id, 1)
        .await
        .expect("add watch");
    let before = service
        .add_item(user.id, bag.id, 2)
        .await
        .expect("add bag");
    assert_eq!(before.items.len(), 2);

    let cleared = service.clear(user.id).await.expect("clear");
    assert!(cleared.items.is_empty());

    let fetched = service.get_or_create(user.id).await.expect("refetch");
    assert_eq!(fetched.id, before.id);
    assert!(fetched.items.is_empty());
}
