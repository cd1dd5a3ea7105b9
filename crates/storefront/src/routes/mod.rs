//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (database ping)
//!
//! # Auth (rate limited)
//! POST /api/auth/register           - Create account, start session
//! POST /api/auth/login              - Verify credentials, start session
//! POST /api/auth/logout             - End session
//! GET  /api/auth/session            - Current session user, if any
//!
//! # Account (requires auth)
//! GET    /api/users/me              - Current account
//! PUT    /api/users/me              - Update name/email/phone
//! DELETE /api/users/me              - Delete account
//!
//! # Addresses (requires auth)
//! GET    /api/addresses             - List saved addresses
//! POST   /api/addresses             - Save an address (reverse geocoded)
//! POST   /api/addresses/{id}/primary - Make an address the primary
//! DELETE /api/addresses/{id}        - Delete an address
//!
//! # Catalog
//! GET  /api/products                - List products (?category=WIRES)
//! GET  /api/products/{id}           - Product detail
//!
//! # Orders (requires auth)
//! POST /api/orders                  - Place an order from a cart snapshot
//! GET  /api/orders                  - Active orders with unarchived items
//! GET  /api/orders/archived         - Orders with their archived items
//! GET  /api/orders/items            - Every item across the user's orders
//! GET  /api/orders/{id}             - One order with all items
//! GET  /api/orders/{id}/items       - One order's items
//! POST /api/orders/items/{id}/archive - Toggle an item's archived flag
//!
//! # Payments (requires auth unless noted)
//! POST /api/payments/orders         - Persist a local gateway-order row
//! POST /api/payments/gateway/orders - Create the order at the gateway
//! POST /api/payments/orders/status  - Upsert gateway-order status
//! POST /api/payments/status         - Upsert payment status
//! GET  /api/payments/orders         - The user's gateway orders
//! GET  /api/payments/orders/{id}    - One gateway order
//! GET  /api/payments/by-order/{gatewayOrderId} - Payments for a gateway order
//! POST /api/razorpay/webhook        - Gateway callback (public, HMAC verified)
//!
//! # Admin (requires admin role)
//! GET    /api/admin/users           - List accounts
//! GET    /api/admin/orders          - List all orders
//! POST   /api/admin/orders/{id}/status - Update fulfillment status
//! POST   /api/admin/products        - Create product
//! PUT    /api/admin/products/{id}   - Update product
//! DELETE /api/admin/products/{id}   - Delete product
//! ```

pub mod addresses;
pub mod admin;
pub mod auth;
pub mod orders;
pub mod payments;
pub mod products;
pub mod users;
pub mod webhook;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// Create the auth routes router (rate limited).
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/session", get(auth::session))
        .layer(auth_rate_limiter())
}

/// Create the account routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/me",
        get(users::me).put(users::update_me).delete(users::delete_me),
    )
}

/// Create the address routes router.
pub fn address_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(addresses::index).post(addresses::create))
        .route("/{id}/primary", post(addresses::mark_primary))
        .route("/{id}", delete(addresses::destroy))
}

/// Create the catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index).post(orders::create))
        .route("/archived", get(orders::archived))
        .route("/items", get(orders::user_items))
        .route("/items/{id}/archive", post(orders::archive_item))
        .route("/{id}", get(orders::show))
        .route("/{id}/items", get(orders::items))
}

/// Create the payment routes router.
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/orders",
            get(payments::user_orders).post(payments::create_order),
        )
        .route("/gateway/orders", post(payments::create_gateway_order))
        .route("/orders/status", post(payments::update_order_status))
        .route("/status", post(payments::update_payment_status))
        .route("/orders/{id}", get(payments::show_order))
        .route("/by-order/{gateway_order_id}", get(payments::for_order))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::users))
        .route("/orders", get(admin::orders))
        .route("/orders/{id}/status", post(admin::update_order_status))
        .route("/products", post(admin::create_product))
        .route(
            "/products/{id}",
            put(admin::update_product).delete(admin::delete_product),
        )
}

/// Create all routes for the storefront API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes())
        .nest("/api/users", user_routes())
        .nest("/api/addresses", address_routes())
        .nest("/api/products", product_routes())
        .nest("/api/orders", order_routes())
        .nest("/api/payments", payment_routes())
        .route("/api/razorpay/webhook", post(webhook::razorpay))
        .nest("/api/admin", admin_routes())
}
