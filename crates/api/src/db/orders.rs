//! Order repository.

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Row};

use boutique_core::{OrderId, UserId};

use super::RepositoryError;
use crate::models::{NewOrderItem, Order, OrderItem, OrderUser, ShippingAddress};

const ORDER_COLUMNS: &str = "id, user_id, address, city, postal_code, country, payment_method, \
     total_price, is_paid, paid_at, is_delivered, delivered_at, \
     payment_id, payment_status, payment_update_time, payment_email, created_at";

const ITEM_COLUMNS: &str = "id, product_id, name, price, quantity";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order with its item snapshots in one transaction.
    ///
    /// `total_price` is stored exactly as supplied; it is not derived from
    /// the items here or anywhere else.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the
    /// transaction rolls back and nothing is persisted.
    pub async fn create(
        &self,
        user_id: UserId,
        items: &[NewOrderItem],
        shipping: &ShippingAddress,
        payment_method: &str,
        total_price: Decimal,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let mut order = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO orders \
             (user_id, address, city, postal_code, country, payment_method, total_price) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(&shipping.address)
        .bind(&shipping.city)
        .bind(&shipping.postal_code)
        .bind(&shipping.country)
        .bind(payment_method)
        .bind(total_price)
        .fetch_one(&mut *tx)
        .await?;

        for item in items {
            let inserted = sqlx::query_as::<_, OrderItem>(&format!(
                "INSERT INTO order_items (order_id, product_id, name, price, quantity) \
                 VALUES ($1, $2, $3, $4, $5) \
                 RETURNING {ITEM_COLUMNS}"
            ))
            .bind(order.id)
            .bind(item.product_id)
            .bind(&item.name)
            .bind(item.price)
            .bind(item.quantity)
            .fetch_one(&mut *tx)
            .await?;

            order.items.push(inserted);
        }

        tx.commit().await?;

        Ok(order)
    }

    /// Get an order with its items and the owning user's name and email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get(
        &self,
        id: OrderId,
    ) -> Result<Option<(Order, OrderUser)>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {prefixed}, u.name AS user_name, u.email AS user_email \
             FROM orders o JOIN users u ON u.id = o.user_id \
             WHERE o.id = $1",
            prefixed = prefixed_order_columns()
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut order = Order::from_row(&row)?;
        let user = OrderUser {
            id: order.user_id,
            name: row.try_get("user_name")?,
            email: Some(row.try_get("user_email")?),
        };
        order.items = self.items(order.id).await?;

        Ok(Some((order, user)))
    }

    /// Mark an order paid, storing the payment confirmation record.
    ///
    /// Repeated calls succeed and overwrite `paid_at` and the payment
    /// fields each time. A single UPDATE keeps the transition atomic.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn mark_paid(
        &self,
        id: OrderId,
        payment_id: &str,
        payment_status: &str,
        payment_update_time: &str,
        payment_email: &str,
    ) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders SET is_paid = TRUE, paid_at = now(), \
                 payment_id = $2, payment_status = $3, \
                 payment_update_time = $4, payment_email = $5 \
             WHERE id = $1 \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(payment_id)
        .bind(payment_status)
        .bind(payment_update_time)
        .bind(payment_email)
        .fetch_optional(self.pool)
        .await?;

        let mut order = row.ok_or(RepositoryError::NotFound)?;
        order.items = self.items(order.id).await?;

        Ok(order)
    }

    /// Mark an order delivered.
    ///
    /// Same repeat-call behavior as [`Self::mark_paid`]: `delivered_at` is
    /// overwritten on every call.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn mark_delivered(&self, id: OrderId) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders SET is_delivered = TRUE, delivered_at = now() \
             WHERE id = $1 \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let mut order = row.ok_or(RepositoryError::NotFound)?;
        order.items = self.items(order.id).await?;

        Ok(order)
    }

    /// All orders for one user, in insertion order, items attached.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let mut orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        for order in &mut orders {
            order.items = self.items(order.id).await?;
        }

        Ok(orders)
    }

    /// All orders across all users with owning user id and name attached.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_all(&self) -> Result<Vec<(Order, OrderUser)>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {prefixed}, u.name AS user_name \
             FROM orders o JOIN users u ON u.id = o.user_id \
             ORDER BY o.id",
            prefixed = prefixed_order_columns()
        ))
        .fetch_all(self.pool)
        .await?;

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            let mut order = Order::from_row(&row)?;
            let user = OrderUser {
                id: order.user_id,
                name: row.try_get("user_name")?,
                email: None,
            };
            order.items = self.items(order.id).await?;
            result.push((order, user));
        }

        Ok(result)
    }

    async fn items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let items = sqlx::query_as::<_, OrderItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY id"
        ))
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }
}

/// `ORDER_COLUMNS` qualified with the `o.` alias for joined queries.
fn prefixed_order_columns() -> String {
    ORDER_COLUMNS
        .split(", ")
        .map(|c| format!("o.{c}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_order_columns() {
        let prefixed = prefixed_order_columns();
        assert!(prefixed.starts_with("o.id, o.user_id"));
        assert!(prefixed.ends_with("o.created_at"));
        assert_eq!(
            prefixed.matches("o.").count(),
            ORDER_COLUMNS.split(", ").count()
        );
    }
}
