//! Order service: creation and the paid/delivered transitions.

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;

use boutique_core::{OrderId, UserId};

use crate::db::{OrderRepository, RepositoryError};
use crate::error::AppError;
use crate::models::{NewOrderItem, Order, OrderUser, ShippingAddress};

/// An incoming order submission.
///
/// Everything here is taken at face value: item snapshots and `total_price`
/// come from the client and are stored without recomputation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub order_items: Option<Vec<NewOrderItem>>,
    #[serde(default)]
    pub shipping_address: ShippingAddress,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub total_price: Decimal,
}

/// Payment confirmation as sent by the payment provider callback.
///
/// Field names mirror the provider payload, snake_case included.
#[derive(Debug, Deserialize)]
pub struct PaymentConfirmation {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub update_time: String,
    #[serde(default)]
    pub payer: Payer,
}

#[derive(Debug, Default, Deserialize)]
pub struct Payer {
    #[serde(default)]
    pub email_address: String,
}

/// Order service.
pub struct OrderService<'a> {
    orders: OrderRepository<'a>,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
        }
    }

    /// Place an order for a user.
    ///
    /// An explicitly empty `orderItems` array is rejected, but an absent one
    /// is accepted and produces an order with no items. Asymmetric on
    /// purpose: it matches the behavior clients already depend on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for an empty item list and
    /// `AppError::Database` if persistence fails.
    pub async fn create(&self, user_id: UserId, new: &NewOrder) -> Result<Order, AppError> {
        let items = validate_items(new.order_items.as_deref())?;
        let order = self
            .orders
            .create(
                user_id,
                items,
                &new.shipping_address,
                &new.payment_method,
                new.total_price,
            )
            .await?;

        Ok(order)
    }

    /// Get an order with the owning user's name and email attached.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no order has this id.
    pub async fn get(&self, id: OrderId) -> Result<(Order, OrderUser), AppError> {
        self.orders
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))
    }

    /// Record a payment confirmation and mark the order paid.
    ///
    /// Calling this again for an already-paid order succeeds and replaces
    /// the stored confirmation and `paidAt` timestamp.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no order has this id.
    pub async fn pay(
        &self,
        id: OrderId,
        confirmation: &PaymentConfirmation,
    ) -> Result<Order, AppError> {
        self.orders
            .mark_paid(
                id,
                &confirmation.id,
                &confirmation.status,
                &confirmation.update_time,
                &confirmation.payer.email_address,
            )
            .await
            .map_err(order_not_found)
    }

    /// Mark an order delivered. Repeat calls overwrite `deliveredAt`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no order has this id.
    pub async fn mark_delivered(&self, id: OrderId) -> Result<Order, AppError> {
        self.orders.mark_delivered(id).await.map_err(order_not_found)
    }

    /// All orders placed by one user.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, AppError> {
        Ok(self.orders.list_for_user(user_id).await?)
    }

    /// All orders across the store, with owner id and name. Admin listing.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<(Order, OrderUser)>, AppError> {
        Ok(self.orders.list_all().await?)
    }
}

fn order_not_found(e: RepositoryError) -> AppError {
    match e {
        RepositoryError::NotFound => AppError::NotFound("Order not found".to_string()),
        other => AppError::Database(other),
    }
}

/// Reject an explicitly empty item list; treat an absent one as no items.
fn validate_items(items: Option<&[NewOrderItem]>) -> Result<&[NewOrderItem], AppError> {
    match items {
        Some([]) => Err(AppError::BadRequest("No order items".to_string())),
        Some(items) => Ok(items),
        None => Ok(&[]),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use boutique_core::ProductId;

    fn line() -> NewOrderItem {
        NewOrderItem {
            product_id: ProductId::new(1),
            name: "Montre dorée classique".to_string(),
            price: "199.99".parse().unwrap(),
            quantity: 1,
        }
    }

    #[test]
    fn test_explicit_empty_items_rejected() {
        let result = validate_items(Some(&[]));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_absent_items_accepted_as_empty() {
        let items = validate_items(None).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_nonempty_items_accepted() {
        let lines = vec![line()];
        let items = validate_items(Some(&lines)).unwrap();
        assert_eq!(items.len(), 1);
    }
}
