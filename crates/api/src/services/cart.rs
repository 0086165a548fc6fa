//! Cart service: line management and pricing.
//!
//! Prices and names on cart lines are snapshots taken at add time; later
//! product edits do not touch existing lines. Totals are computed on read
//! from the exact line prices, with rounding applied once at the end.

use rust_decimal::Decimal;
use sqlx::PgPool;

use boutique_core::{CartItemId, ProductId, UserId};
use boutique_core::money::CartTotals;

use crate::db::{CartRepository, ProductRepository};
use crate::error::AppError;
use crate::models::{Cart, CartItem};

/// Cart service.
pub struct CartService<'a> {
    carts: CartRepository<'a>,
    products: ProductRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            carts: CartRepository::new(pool),
            products: ProductRepository::new(pool),
        }
    }

    /// Get the user's cart, creating an empty one on first access.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if a query fails.
    pub async fn get_or_create(&self, user_id: UserId) -> Result<Cart, AppError> {
        Ok(self.carts.get_or_create(user_id).await?)
    }

    /// Add a product to the user's cart, merging quantities if a line for
    /// that product already exists.
    ///
    /// The stock check compares the requested quantity alone against stock,
    /// not the merged line total - adding 3 then 3 again passes with 5 in
    /// stock. Preserved behavior.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the product doesn't exist, and
    /// `AppError::BadRequest` if the requested quantity exceeds stock.
    pub async fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<Cart, AppError> {
        if quantity < 1 {
            return Err(AppError::BadRequest(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let product = self
            .products
            .get(product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        if quantity > product.count_in_stock {
            return Err(AppError::BadRequest("Not enough stock".to_string()));
        }

        let cart = self.carts.get_or_create(user_id).await?;
        self.carts
            .upsert_item(
                cart.id,
                product.id,
                &product.name,
                &product.image_url,
                product.price,
                quantity,
            )
            .await?;

        self.get_or_create(user_id).await
    }

    /// Set a cart line's quantity to an absolute value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if the quantity is below 1 or exceeds
    /// the product's current stock, and `AppError::NotFound` if the cart or
    /// line doesn't exist.
    pub async fn update_item_quantity(
        &self,
        user_id: UserId,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<Cart, AppError> {
        if quantity < 1 {
            return Err(AppError::BadRequest(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let cart = self
            .carts
            .get_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cart not found".to_string()))?;

        let item = self
            .carts
            .get_item(cart.id, item_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;

        // The referenced product may have been deleted since the line was
        // snapshotted; in that case no stock bound applies.
        if let Some(product) = self.products.get(item.product_id).await? {
            if quantity > product.count_in_stock {
                return Err(AppError::BadRequest("Not enough stock".to_string()));
            }
        }

        if !self.carts.set_item_quantity(cart.id, item_id, quantity).await? {
            return Err(AppError::NotFound("Item not found".to_string()));
        }

        self.get_or_create(user_id).await
    }

    /// Remove a line from the user's cart. Removing an id that is not in
    /// the cart succeeds silently.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the user has no cart at all.
    pub async fn remove_item(
        &self,
        user_id: UserId,
        item_id: CartItemId,
    ) -> Result<Cart, AppError> {
        let cart = self
            .carts
            .get_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cart not found".to_string()))?;

        self.carts.delete_item(cart.id, item_id).await?;
        self.get_or_create(user_id).await
    }

    /// Empty the user's cart, leaving the cart row in place.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the user has no cart.
    pub async fn clear(&self, user_id: UserId) -> Result<Cart, AppError> {
        let cart = self
            .carts
            .get_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cart not found".to_string()))?;

        self.carts.clear(cart.id).await?;
        self.get_or_create(user_id).await
    }
}

/// Totals for a set of cart lines: exact line sums, tax and grand total
/// each rounded to cents from the exact subtotal.
#[must_use]
pub fn compute_totals(items: &[CartItem]) -> CartTotals {
    let subtotal: Decimal = items
        .iter()
        .map(|item| item.price * Decimal::from(item.quantity))
        .sum();

    CartTotals::from_subtotal(subtotal)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(price: &str, quantity: i32) -> CartItem {
        CartItem {
            id: CartItemId::new(1),
            product_id: ProductId::new(1),
            name: "Montre doree".to_string(),
            image: "/assets/montre1.jpg".to_string(),
            price: price.parse().unwrap(),
            quantity,
        }
    }

    #[test]
    fn test_totals_empty_cart() {
        let totals = compute_totals(&[]);
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn test_totals_sum_line_prices() {
        // 199.99 + 2 x 69.99 = 339.97; 10% tax rounds to 34.00.
        let items = vec![item("199.99", 1), item("69.99", 2)];
        let totals = compute_totals(&items);

        assert_eq!(totals.subtotal, "339.97".parse().unwrap());
        assert_eq!(totals.tax, "34.00".parse().unwrap());
        assert_eq!(totals.total, "373.97".parse().unwrap());
    }

    #[test]
    fn test_totals_round_once_at_the_end() {
        let items = vec![item("33.335", 3)];
        let totals = compute_totals(&items);

        // Exact subtotal 100.005 rounds half-away-from-zero to 100.01.
        assert_eq!(totals.subtotal, "100.01".parse().unwrap());
        // Tax computed from the exact 100.005, not the rounded subtotal.
        assert_eq!(totals.tax, "10.00".parse().unwrap());
        assert_eq!(totals.total, "110.01".parse().unwrap());
    }
}
