//! Order payment lifecycle against a real database.
//!
//! Requires a running `PostgreSQL` database with migrations applied; see
//! the crate docs.

use std::time::Duration;

use boutique_api::models::ShippingAddress;
use boutique_api::services::OrderService;
use boutique_api::services::orders::{NewOrder, PaymentConfirmation, Payer};
use boutique_integration_tests::{register_user, test_pool};

fn confirmation(transaction_id: &str) -> PaymentConfirmation {
    PaymentConfirmation {
        id: transaction_id.to_string(),
        status: "COMPLETED".to_string(),
        update_time: "2026-08-29T12:00:00Z".to_string(),
        payer: Payer {
            email_address: "payer@example.com".to_string(),
        },
    }
}

#[tokio::test]
#[ignore = "Requires a PostgreSQL database (set DATABASE_URL)"]
async fn test_paying_twice_replaces_timestamp_and_confirmation() {
    let pool = test_pool().await;
    let user = register_user(&pool, "payer").await;

    let service = OrderService::new(&pool);
    let order = service
        .create(
            user.id,
            &NewOrder {
                order_items: None,
                shipping_address: ShippingAddress::default(),
                payment_method: "e-dinnar".to_string(),
                total_price: "19.99".parse().expect("price literal"),
            },
        )
        .await
        .expect("create order");
    assert!(!order.is_paid);
    assert!(order.paid_at.is_none());

    let first = service
        .pay(order.id, &confirmation("PAY-1"))
        .await
        .expect("first payment");
    assert!(first.is_paid);
    let first_paid_at = first.paid_at.expect("paidAt set");

    tokio::time::sleep(Duration::from_millis(20)).await;

    let second = service
        .pay(order.id, &confirmation("PAY-2"))
        .await
        .expect("repeat payment");
    let second_paid_at = second.paid_at.expect("paidAt still set");

    assert!(second_paid_at >= first_paid_at);
    let stored = second.payment_result.expect("confirmation stored");
    assert_eq!(stored.id, "PAY-2");
}
