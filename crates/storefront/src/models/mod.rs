//! Domain models for the storefront.
//!
//! Row types decoded straight from `PostgreSQL` via `sqlx::FromRow`, plus
//! composed response shapes (orders with their items and products). All
//! models serialize to the camelCase wire format the API exposes.

pub mod address;
pub mod order;
pub mod payment;
pub mod product;
pub mod session;
pub mod user;

pub use address::SavedAddress;
pub use order::{Order, OrderItem, OrderItemWithProduct, OrderWithDetails};
pub use payment::{GatewayOrder, GatewayPayment};
pub use product::Product;
pub use session::CurrentUser;
pub use user::User;
