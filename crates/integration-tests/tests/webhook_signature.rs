//! Payment-webhook authentication tests.
//!
//! The callback must prove itself with `HMAC-SHA256(secret, order|payment)`
//! before any state changes. The pool behind the router is dead, so a
//! rejected callback returning 401 (not a storage error) demonstrates the
//! signature gate fires first and mutates nothing.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tower::ServiceExt;

use voltcart_integration_tests::{TEST_WEBHOOK_SECRET, test_router};

fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("hmac accepts any key");
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

async fn post_webhook(body: String) -> StatusCode {
    let request = Request::builder()
        .method("POST")
        .uri("/api/razorpay/webhook")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .expect("valid request");

    test_router()
        .oneshot(request)
        .await
        .expect("router must respond")
        .status()
}

fn webhook_body(order_id: &str, payment_id: &str, signature: &str) -> String {
    serde_json::json!({
        "razorpay_order_id": order_id,
        "razorpay_payment_id": payment_id,
        "razorpay_signature": signature,
    })
    .to_string()
}

#[tokio::test]
async fn test_garbage_signature_rejected_without_touching_storage() {
    let status = post_webhook(webhook_body("order_abc", "pay_def", "deadbeef")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signature_for_other_ids_rejected() {
    let signature = sign(TEST_WEBHOOK_SECRET, "order_other", "pay_other");
    let status = post_webhook(webhook_body("order_abc", "pay_def", &signature)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signature_with_wrong_secret_rejected() {
    let signature = sign("not-the-secret", "order_abc", "pay_def");
    let status = post_webhook(webhook_body("order_abc", "pay_def", &signature)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_signature_passes_the_gate() {
    let signature = sign(TEST_WEBHOOK_SECRET, "order_abc", "pay_def");
    let status = post_webhook(webhook_body("order_abc", "pay_def", &signature)).await;

    // The gate opens and the handler proceeds to storage, which fails
    // against the dead pool; the one status it must not be is 401.
    assert_ne!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_body_is_a_client_error() {
    let status = post_webhook(r#"{"razorpay_order_id": "order_abc"}"#.to_owned()).await;
    assert!(status.is_client_error());
}
