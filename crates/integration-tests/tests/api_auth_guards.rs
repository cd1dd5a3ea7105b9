//! Session-guard tests across the assembled API router.
//!
//! No session layer is mounted, so every protected route must reject with
//! 401 before touching the (intentionally dead) database pool.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use tower::ServiceExt;

use voltcart_integration_tests::test_router;

async fn status_of(method: Method, uri: &str, body: Option<&str>) -> StatusCode {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_owned()))
            .expect("valid request"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("valid request"),
    };

    test_router()
        .oneshot(request)
        .await
        .expect("router must respond")
        .status()
}

#[tokio::test]
async fn test_order_routes_require_session() {
    assert_eq!(
        status_of(Method::GET, "/api/orders", None).await,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        status_of(Method::GET, "/api/orders/archived", None).await,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        status_of(
            Method::POST,
            "/api/orders",
            Some(r#"{"items":[{"productId":1,"quantity":2}],"shippingAddressId":1}"#),
        )
        .await,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_address_routes_require_session() {
    assert_eq!(
        status_of(Method::GET, "/api/addresses", None).await,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        status_of(
            Method::POST,
            "/api/addresses",
            Some(r#"{"addressNickname":"Home","receiverPhone":"9876543210"}"#),
        )
        .await,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        status_of(Method::POST, "/api/addresses/1/primary", None).await,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_payment_routes_require_session() {
    assert_eq!(
        status_of(Method::GET, "/api/payments/orders", None).await,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        status_of(
            Method::POST,
            "/api/payments/orders",
            Some(r#"{"amount":"499.00","currency":"INR"}"#),
        )
        .await,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_admin_routes_require_session() {
    // Without any session the admin guard rejects as unauthenticated,
    // not merely forbidden
    assert_eq!(
        status_of(Method::GET, "/api/admin/users", None).await,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        status_of(Method::GET, "/api/admin/orders", None).await,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    assert_eq!(
        status_of(Method::GET, "/api/nope", None).await,
        StatusCode::NOT_FOUND
    );
}
