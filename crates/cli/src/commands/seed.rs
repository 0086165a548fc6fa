//! Seed the database with sample data.
//!
//! Mirrors the demo storefront catalog: three users (one admin), nine
//! products, and one unpaid order for the second user. All sample accounts
//! share the password `password123`.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;

use boutique_api::db;
use boutique_api::services::auth::hash_password;
use boutique_core::{OrderId, ProductId, UserId};

struct SeedUser {
    name: &'static str,
    email: &'static str,
    is_admin: bool,
}

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    price: Decimal,
    count_in_stock: i32,
    image_url: &'static str,
    category: &'static str,
}

const SAMPLE_PASSWORD: &str = "password123";

const USERS: &[SeedUser] = &[
    SeedUser {
        name: "Admin User",
        email: "admin@example.com",
        is_admin: true,
    },
    SeedUser {
        name: "John Doe",
        email: "john@example.com",
        is_admin: false,
    },
    SeedUser {
        name: "Jane Smith",
        email: "jane@example.com",
        is_admin: false,
    },
];

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Montre dorée classique",
        description: "Montre pour femme avec un bracelet doré et un design intemporel.",
        price: Decimal::from_parts(19999, 0, 0, false, 2),
        count_in_stock: 10,
        image_url: "/assets/montre1.jpg",
        category: "Montres",
    },
    SeedProduct {
        name: "robe",
        description: "robe tendance pour un look professionnel ou décontracté.",
        price: Decimal::from_parts(9999, 0, 0, false, 2),
        count_in_stock: 12,
        image_url: "/assets/robe.jpg",
        category: "Vêtements",
    },
    SeedProduct {
        name: "Mini sac à bandoulière",
        description: "Petit sac stylé avec chaîne dorée pour une touche chic.",
        price: Decimal::from_parts(6999, 0, 0, false, 2),
        count_in_stock: 25,
        image_url: "/assets/sac3.jpg",
        category: "Sacs",
    },
    SeedProduct {
        name: "Montre",
        description: "Montre tendance avec un boîtier en acier inoxydable rouge.",
        price: Decimal::from_parts(14999, 0, 0, false, 2),
        count_in_stock: 8,
        image_url: "/assets/montre3.jpg",
        category: "Montres",
    },
    SeedProduct {
        name: "robe bleau",
        description: "robe fluide plissée pour un look féminin et moderne.",
        price: Decimal::from_parts(5999, 0, 0, false, 2),
        count_in_stock: 18,
        image_url: "/assets/robe2.webp",
        category: "Vêtements",
    },
    SeedProduct {
        name: "Sac",
        description: "Grand sac cabas en toile, pratique et stylé pour le quotidien.",
        price: Decimal::from_parts(4999, 0, 0, false, 2),
        count_in_stock: 30,
        image_url: "/assets/sec1.jpg",
        category: "Sacs",
    },
    SeedProduct {
        name: "Sac",
        description: "Grand sac cabas en toile, pratique et stylé pour le quotidien.",
        price: Decimal::from_parts(5099, 0, 0, false, 2),
        count_in_stock: 30,
        image_url: "/assets/sec2.jpg",
        category: "Sacs",
    },
    SeedProduct {
        name: "Sac",
        description: "Grand sac cabas en toile, pratique et stylé pour le quotidien.",
        price: Decimal::from_parts(6099, 0, 0, false, 2),
        count_in_stock: 30,
        image_url: "/assets/sacs.jpg",
        category: "Sacs",
    },
    SeedProduct {
        name: "Montre dorée classique",
        description: "Montre pour femme avec un bracelet doré et un design intemporel.",
        price: Decimal::from_parts(19999, 0, 0, false, 2),
        count_in_stock: 10,
        image_url: "/assets/montre4.jpg",
        category: "Montres",
    },
];

/// Seed the database, or just wipe it when `destroy` is set.
///
/// # Errors
///
/// Returns an error if the database URL is missing or any statement fails.
pub async fn run(destroy: bool) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url()?;

    info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    clear(&pool).await?;
    info!("Data cleared");

    if destroy {
        info!("Data destroyed successfully!");
        return Ok(());
    }

    let user_ids = seed_users(&pool).await?;
    info!(count = user_ids.len(), "Users created");

    let product_ids = seed_products(&pool).await?;
    info!(count = product_ids.len(), "Products created");

    // One unpaid order for John Doe: one gold watch, two red watches.
    let john = user_ids.get(1).copied().ok_or("seed user missing")?;
    seed_order(&pool, john, &product_ids).await?;
    info!("Sample order created");

    info!("Data imported successfully!");
    Ok(())
}

async fn clear(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("TRUNCATE users, products, carts, cart_items, orders, order_items RESTART IDENTITY CASCADE")
        .execute(pool)
        .await?;
    Ok(())
}

async fn seed_users(pool: &PgPool) -> Result<Vec<UserId>, Box<dyn std::error::Error>> {
    let mut ids = Vec::with_capacity(USERS.len());

    for user in USERS {
        let password_hash = hash_password(SAMPLE_PASSWORD)?;
        let (id,): (UserId,) = sqlx::query_as(
            "INSERT INTO users (name, email, password_hash, is_admin) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(user.name)
        .bind(user.email)
        .bind(&password_hash)
        .bind(user.is_admin)
        .fetch_one(pool)
        .await?;

        ids.push(id);
    }

    Ok(ids)
}

async fn seed_products(pool: &PgPool) -> Result<Vec<ProductId>, sqlx::Error> {
    let mut ids = Vec::with_capacity(PRODUCTS.len());

    for product in PRODUCTS {
        let (id,): (ProductId,) = sqlx::query_as(
            "INSERT INTO products (name, description, price, count_in_stock, image_url, category) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(product.name)
        .bind(product.description)
        .bind(product.price)
        .bind(product.count_in_stock)
        .bind(product.image_url)
        .bind(product.category)
        .fetch_one(pool)
        .await?;

        ids.push(id);
    }

    Ok(ids)
}

async fn seed_order(
    pool: &PgPool,
    user_id: UserId,
    product_ids: &[ProductId],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = Vec::new();
    for (index, quantity) in [(0_usize, 1_i32), (3, 2)] {
        let id = product_ids
            .get(index)
            .copied()
            .ok_or("seed product id missing")?;
        let product = PRODUCTS.get(index).ok_or("seed product missing")?;
        lines.push((id, product, quantity));
    }

    let total_price: Decimal = lines
        .iter()
        .map(|(_, product, quantity)| product.price * Decimal::from(*quantity))
        .sum();

    let (order_id,): (OrderId,) = sqlx::query_as(
        "INSERT INTO orders \
         (user_id, address, city, postal_code, country, payment_method, total_price) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
    )
    .bind(user_id)
    .bind("123 Example St")
    .bind("Test City")
    .bind("12345")
    .bind("USA")
    .bind("e-dinnar")
    .bind(total_price)
    .fetch_one(pool)
    .await?;

    for (product_id, product, quantity) in lines {
        sqlx::query(
            "INSERT INTO order_items (order_id, product_id, name, price, quantity) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(order_id)
        .bind(product_id)
        .bind(product.name)
        .bind(product.price)
        .bind(quantity)
        .execute(pool)
        .await?;
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_prices_carry_two_decimal_places() {
        assert_eq!(PRODUCTS[0].price, "199.99".parse().unwrap());
        assert_eq!(PRODUCTS[3].price, "149.99".parse().unwrap());
        assert!(PRODUCTS.iter().all(|p| p.price.scale() == 2));
    }
}
