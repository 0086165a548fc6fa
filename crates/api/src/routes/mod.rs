//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                    - Liveness check
//! GET  /health/ready              - Readiness check (database ping)
//!
//! # Auth
//! POST /api/auth/register         - Create account, returns token
//! POST /api/auth/login            - Exchange credentials for token
//! GET  /api/auth/profile          - Current user (auth)
//!
//! # Products
//! GET    /api/products            - Product listing
//! GET    /api/products/{id}       - Product detail
//! POST   /api/products            - Create product (admin)
//! PUT    /api/products/{id}       - Partial update (admin)
//! DELETE /api/products/{id}       - Delete product (admin)
//!
//! # Cart (all auth)
//! GET    /api/cart                - Cart with totals (creates empty cart)
//! POST   /api/cart                - Add product line
//! PUT    /api/cart/{itemId}       - Set line quantity
//! DELETE /api/cart/{itemId}       - Remove line
//! DELETE /api/cart                - Empty the cart
//!
//! # Orders
//! POST /api/orders                - Place order (auth)
//! GET  /api/orders                - All orders (admin)
//! GET  /api/orders/myorders       - Own orders (auth)
//! GET  /api/orders/{id}           - Order detail (auth)
//! PUT  /api/orders/{id}/pay       - Record payment (auth)
//! PUT  /api/orders/{id}/deliver   - Mark delivered (admin)
//! ```

pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

/// Routes under `/api/auth`.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", axum::routing::post(auth::register))
        .route("/login", axum::routing::post(auth::login))
        .route("/profile", get(auth::profile))
}

/// Routes under `/api/products`.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
}

/// Routes under `/api/cart`.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).post(cart::add).delete(cart::clear))
        .route("/{itemId}", put(cart::update).delete(cart::remove))
}

/// Create the order routes router.
///
/// `/myorders` is a static segment and must stay a separate route so the
/// `/{id}` matcher never swallows it.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index).post(orders::create))
        .route("/myorders", get(orders::my_orders))
        .route("/{id}", get(orders::show))
        .route("/{id}/pay", put(orders::pay))
        .route("/{id}/deliver", put(orders::deliver))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes())
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/orders", order_routes())
}
