//! Product domain type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use boutique_core::ProductId;

/// A catalog product.
///
/// Serializes directly as the wire representation: every field is public
/// API surface, so no separate response type is needed.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price; non-negative, enforced by the store.
    pub price: Decimal,
    /// Units available; non-negative, enforced by the store.
    pub count_in_stock: i32,
    pub image_url: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}
