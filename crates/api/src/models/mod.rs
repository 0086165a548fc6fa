//! Domain models.
//!
//! Plain data types shared by repositories, services, and routes. Behavior
//! lives in services - these types carry no methods beyond constructors and
//! accessors. Wire format is camelCase JSON matching the public API.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItem};
pub use order::{NewOrderItem, Order, OrderItem, OrderUser, PaymentResult, ShippingAddress};
pub use product::Product;
pub use user::User;
