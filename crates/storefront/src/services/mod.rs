//! Business-logic services for the storefront.
//!
//! - [`auth`] - Credential registration and login
//! - [`geocoding`] - Reverse geocoding behind an injectable capability
//! - [`razorpay`] - Payment-gateway client and webhook signature checks

pub mod auth;
pub mod geocoding;
pub mod razorpay;

pub use auth::{AuthError, AuthService};
pub use geocoding::{GeocodingError, GoogleGeocoder, ResolvedLocation, ReverseGeocoder};
pub use razorpay::{RazorpayClient, RazorpayError, verify_webhook_signature};
