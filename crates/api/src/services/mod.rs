//! Business logic services.
//!
//! Services own behavior; models stay plain data. Each service borrows the
//! connection pool and constructs its repositories per request.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod orders;

pub use auth::AuthService;
pub use cart::CartService;
pub use catalog::CatalogService;
pub use orders::OrderService;
