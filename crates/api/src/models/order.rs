//! Order domain types.
//!
//! Orders are created once from a cart-like submission and only ever mutated
//! by the paid/delivered transitions. Item snapshots are immutable.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, Row, postgres::PgRow};

use boutique_core::{Email, OrderId, OrderItemId, ProductId, UserId};

/// An immutable order line, snapshotted at creation time.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    /// Weak reference to the product; survives product deletion.
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}

/// An incoming order line from the client, not yet persisted.
///
/// The client supplies the snapshot values; nothing here is validated
/// against the catalog (matching the order total trust model).
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}

/// Shipping destination captured at order creation.
#[derive(Debug, Clone, Serialize, serde::Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

/// Payment confirmation record, built from the provider payload.
///
/// `update_time` and `email_address` keep the provider's snake_case keys on
/// the wire - this block is stored and echoed verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentResult {
    /// Provider transaction id.
    pub id: String,
    pub status: String,
    pub update_time: String,
    pub email_address: String,
}

/// A placed order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    /// Snapshot lines; may be empty when the client omitted them.
    #[serde(rename = "orderItems")]
    pub items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    /// Client-supplied total, stored as-is and never recomputed server-side.
    pub total_price: Decimal,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub is_delivered: bool,
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_result: Option<PaymentResult>,
    pub created_at: DateTime<Utc>,
}

impl FromRow<'_, PgRow> for Order {
    fn from_row(row: &PgRow) -> sqlx::Result<Self> {
        // payment_* columns are all-or-nothing; the transaction id decides.
        let payment_result = row
            .try_get::<Option<String>, _>("payment_id")?
            .map(|id| -> sqlx::Result<PaymentResult> {
                Ok(PaymentResult {
                    id,
                    status: row
                        .try_get::<Option<String>, _>("payment_status")?
                        .unwrap_or_default(),
                    update_time: row
                        .try_get::<Option<String>, _>("payment_update_time")?
                        .unwrap_or_default(),
                    email_address: row
                        .try_get::<Option<String>, _>("payment_email")?
                        .unwrap_or_default(),
                })
            })
            .transpose()?;

        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            items: Vec::new(),
            shipping_address: ShippingAddress {
                address: row.try_get("address")?,
                city: row.try_get("city")?,
                postal_code: row.try_get("postal_code")?,
                country: row.try_get("country")?,
            },
            payment_method: row.try_get("payment_method")?,
            total_price: row.try_get("total_price")?,
            is_paid: row.try_get("is_paid")?,
            paid_at: row.try_get("paid_at")?,
            is_delivered: row.try_get("is_delivered")?,
            delivered_at: row.try_get("delivered_at")?,
            payment_result,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Owning-user details attached to order reads.
///
/// `get` includes name and email for display; the admin listing attaches
/// id and name only, so email is optional on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUser {
    pub id: UserId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
}
