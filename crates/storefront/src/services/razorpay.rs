//! Razorpay payment-gateway client and webhook signature verification.
//!
//! Order creation talks to the gateway REST API; webhook callbacks are
//! authenticated by recomputing an HMAC-SHA256 signature over
//! `"{order_id}|{payment_id}"` with the shared key secret.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::Sha256;
use thiserror::Error;

use voltcart_core::Price;

use crate::config::RazorpayConfig;

/// Razorpay REST API base URL.
const BASE_URL: &str = "https://api.razorpay.com/v1";

type HmacSha256 = Hmac<Sha256>;

/// Errors from gateway interactions.
#[derive(Debug, Error)]
pub enum RazorpayError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// Amount cannot be expressed in the gateway's minor units.
    #[error("amount not representable in minor units")]
    AmountNotRepresentable,
}

/// Razorpay REST API client.
#[derive(Clone)]
pub struct RazorpayClient {
    client: reqwest::Client,
    key_id: String,
    key_secret: SecretString,
}

impl RazorpayClient {
    /// Create a new gateway client from configuration.
    #[must_use]
    pub fn new(config: &RazorpayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
        }
    }

    /// Create an order at the gateway and return its gateway-assigned id.
    ///
    /// The gateway takes amounts in minor units (paise for INR).
    ///
    /// # Errors
    ///
    /// Returns `RazorpayError::AmountNotRepresentable` if the amount
    /// overflows minor units, and transport/API variants otherwise.
    pub async fn create_order(
        &self,
        price: Price,
        receipt: Option<&str>,
    ) -> Result<String, RazorpayError> {
        let amount = price
            .minor_units()
            .ok_or(RazorpayError::AmountNotRepresentable)?;

        let body = serde_json::json!({
            "amount": amount,
            "currency": price.currency_code.as_str(),
            "receipt": receipt,
        });

        let response = self
            .client
            .post(format!("{BASE_URL}/orders"))
            .basic_auth(&self.key_id, Some(self.key_secret.expose_secret()))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RazorpayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let order: GatewayOrderResponse = response
            .json()
            .await
            .map_err(|e| RazorpayError::Parse(e.to_string()))?;

        Ok(order.id)
    }
}

/// Order resource subset returned by the gateway.
#[derive(Debug, Deserialize)]
struct GatewayOrderResponse {
    id: String,
}

/// Verify a webhook callback signature.
///
/// The expected signature is hex-encoded
/// `HMAC-SHA256(secret, order_id + "|" + payment_id)`. Comparison happens
/// on the decoded MAC bytes in constant time; malformed hex is rejected
/// outright.
#[must_use]
pub fn verify_webhook_signature(
    secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> bool {
    let Ok(provided) = hex::decode(signature) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());

    mac.verify_slice(&provided).is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Hex-encoded HMAC-SHA256 over `order_id|payment_id`, the format the
    /// gateway sends.
    fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{order_id}|{payment_id}").as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_valid_signature_accepted() {
        let signature = sign("whsec", "order_123", "pay_456");
        assert!(verify_webhook_signature("whsec", "order_123", "pay_456", &signature));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signature = sign("other", "order_123", "pay_456");
        assert!(!verify_webhook_signature("whsec", "order_123", "pay_456", &signature));
    }

    #[test]
    fn test_swapped_ids_rejected() {
        // The pipe separator binds the two ids in order
        let signature = sign("whsec", "pay_456", "order_123");
        assert!(!verify_webhook_signature("whsec", "order_123", "pay_456", &signature));
    }

    #[test]
    fn test_non_hex_signature_rejected() {
        assert!(!verify_webhook_signature("whsec", "order_123", "pay_456", "zz-not-hex"));
    }

    #[test]
    fn test_truncated_signature_rejected() {
        let mut signature = sign("whsec", "order_123", "pay_456");
        signature.truncate(32);
        assert!(!verify_webhook_signature("whsec", "order_123", "pay_456", &signature));
    }
}
