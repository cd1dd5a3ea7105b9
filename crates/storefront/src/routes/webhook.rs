//! Payment-gateway webhook handler.
//!
//! The gateway calls this endpoint out-of-band after a checkout; it is the
//! only unauthenticated mutation in the API, so the callback must prove
//! itself with an HMAC signature before any state changes.

use axum::{Json, extract::State};
use secrecy::ExposeSecret;
use serde::Deserialize;

use voltcart_core::PaymentStatus;

use crate::db::payments::PaymentRepository;
use crate::error::{AppError, Result};
use crate::services::razorpay::verify_webhook_signature;
use crate::state::AppState;

/// Callback body delivered by the gateway.
#[derive(Debug, Deserialize)]
pub struct WebhookRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

/// Verify and apply a payment callback.
///
/// POST /api/razorpay/webhook
///
/// The signature is `HMAC-SHA256(secret, order_id + "|" + payment_id)`;
/// a mismatch is rejected outright with no state change. A valid callback
/// upserts the payment as successful.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` on a signature mismatch.
pub async fn razorpay(
    State(state): State<AppState>,
    Json(req): Json<WebhookRequest>,
) -> Result<Json<serde_json::Value>> {
    let secret = state.config().razorpay.key_secret.expose_secret();

    if !verify_webhook_signature(
        secret,
        &req.razorpay_order_id,
        &req.razorpay_payment_id,
        &req.razorpay_signature,
    ) {
        tracing::warn!(
            razorpay_order_id = %req.razorpay_order_id,
            "webhook signature mismatch"
        );
        return Err(AppError::Unauthorized("Invalid signature".to_owned()));
    }

    PaymentRepository::new(state.pool())
        .upsert_payment_status(
            &req.razorpay_payment_id,
            PaymentStatus::Success,
            &req.razorpay_order_id,
        )
        .await?;

    tracing::info!(
        razorpay_order_id = %req.razorpay_order_id,
        razorpay_payment_id = %req.razorpay_payment_id,
        "payment confirmed via webhook"
    );

    Ok(Json(serde_json::json!({ "success": true })))
}
