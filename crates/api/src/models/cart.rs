//! Cart domain types.
//!
//! Cart items snapshot the product's name/image/price at add time; later
//! product edits or deletions do not touch them. Totals are computed by the
//! cart service, not stored.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use boutique_core::{CartId, CartItemId, ProductId, UserId};

/// A line in a user's cart.
///
/// `product_id` is a weak reference - the product may have been edited or
/// deleted since the line was added, which is why name/image/price are
/// snapshots rather than live lookups.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Unique item ID (the handle used by update/remove routes).
    pub id: CartItemId,
    pub product_id: ProductId,
    /// Product name at the time the line was added.
    pub name: String,
    /// Product image at the time the line was added.
    #[sqlx(rename = "image_url")]
    pub image: String,
    /// Unit price locked in at add time.
    pub price: Decimal,
    /// Always >= 1; a quantity of 0 is expressed by removing the line.
    pub quantity: i32,
}

/// A user's cart: at most one per user, created lazily, never deleted.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
    /// Lines in insertion order, at most one per distinct product.
    /// Not a row column; populated by a second query in the repository.
    #[sqlx(skip)]
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
}
