//! Catalog service: product CRUD.
//!
//! The only behavior beyond plumbing is the partial-update merge, which
//! deliberately treats falsy values (empty string, zero price, zero stock)
//! as "field absent" - a quirk preserved from the system this replaces, not
//! an oversight.

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;

use boutique_core::ProductId;

use crate::db::{ProductRepository, RepositoryError};
use crate::error::AppError;
use crate::models::Product;

/// A new product submission.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub count_in_stock: i32,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub category: String,
}

/// A partial product update. Missing fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub count_in_stock: Option<i32>,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

/// Catalog service.
pub struct CatalogService<'a> {
    products: ProductRepository<'a>,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            products: ProductRepository::new(pool),
        }
    }

    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.products.list().await?)
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no product has this id.
    pub async fn get(&self, id: ProductId) -> Result<Product, AppError> {
        self.products
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the insert fails.
    pub async fn create(&self, new: &NewProduct) -> Result<Product, AppError> {
        let product = self
            .products
            .create(
                &new.name,
                &new.description,
                new.price,
                new.count_in_stock,
                &new.image_url,
                &new.category,
            )
            .await?;

        Ok(product)
    }

    /// Apply a partial update to a product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no product has this id.
    pub async fn update(
        &self,
        id: ProductId,
        update: &ProductUpdate,
    ) -> Result<Product, AppError> {
        let mut product = self.get(id).await?;

        apply_update(&mut product, update);
        self.products.update(&product).await.map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Product not found".to_string()),
            other => AppError::Database(other),
        })?;

        Ok(product)
    }

    /// Permanently delete a product. No cascade: carts and orders keep
    /// their snapshots of it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no product has this id.
    pub async fn delete(&self, id: ProductId) -> Result<(), AppError> {
        self.products.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Product not found".to_string()),
            other => AppError::Database(other),
        })
    }
}

/// Merge a partial update into a product, truthy fields only.
///
/// Empty strings, a zero price, and zero stock all count as "absent" and
/// leave the existing value in place - so this cannot be used to zero out a
/// field. Preserved behavior, not a bug to fix here.
fn apply_update(product: &mut Product, update: &ProductUpdate) {
    if let Some(name) = update.name.as_ref().filter(|s| !s.is_empty()) {
        product.name.clone_from(name);
    }
    if let Some(description) = update.description.as_ref().filter(|s| !s.is_empty()) {
        product.description.clone_from(description);
    }
    if let Some(price) = update.price.filter(|p| !p.is_zero()) {
        product.price = price;
    }
    if let Some(count_in_stock) = update.count_in_stock.filter(|&c| c != 0) {
        product.count_in_stock = count_in_stock;
    }
    if let Some(image_url) = update.image_url.as_ref().filter(|s| !s.is_empty()) {
        product.image_url.clone_from(image_url);
    }
    if let Some(category) = update.category.as_ref().filter(|s| !s.is_empty()) {
        product.category.clone_from(category);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_product() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Montre doree classique".to_string(),
            description: "Montre pour femme".to_string(),
            price: "199.99".parse().unwrap(),
            count_in_stock: 10,
            image_url: "/assets/montre1.jpg".to_string(),
            category: "Montres".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_update_overwrites_present_fields() {
        let mut product = sample_product();
        let update = ProductUpdate {
            name: Some("Montre argentee".to_string()),
            price: Some("149.99".parse().unwrap()),
            ..ProductUpdate::default()
        };

        apply_update(&mut product, &update);

        assert_eq!(product.name, "Montre argentee");
        assert_eq!(product.price, "149.99".parse().unwrap());
        // Untouched fields keep their values
        assert_eq!(product.count_in_stock, 10);
        assert_eq!(product.category, "Montres");
    }

    #[test]
    fn test_apply_update_missing_fields_unchanged() {
        let mut product = sample_product();
        apply_update(&mut product, &ProductUpdate::default());
        assert_eq!(product.name, "Montre doree classique");
        assert_eq!(product.price, "199.99".parse().unwrap());
    }

    #[test]
    fn test_apply_update_zero_price_treated_as_absent() {
        let mut product = sample_product();
        let update = ProductUpdate {
            price: Some(Decimal::ZERO),
            count_in_stock: Some(0),
            ..ProductUpdate::default()
        };

        apply_update(&mut product, &update);

        // Falsy values do not overwrite - the preserved quirk.
        assert_eq!(product.price, "199.99".parse().unwrap());
        assert_eq!(product.count_in_stock, 10);
    }

    #[test]
    fn test_apply_update_empty_string_treated_as_absent() {
        let mut product = sample_product();
        let update = ProductUpdate {
            name: Some(String::new()),
            description: Some(String::new()),
            ..ProductUpdate::default()
        };

        apply_update(&mut product, &update);

        assert_eq!(product.name, "Montre doree classique");
        assert_eq!(product.description, "Montre pour femme");
    }
}
