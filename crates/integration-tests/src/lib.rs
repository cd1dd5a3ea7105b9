//! Integration tests for Voltcart.
//!
//! These tests drive the assembled router and service seams without a live
//! database or network: the pool is created lazily and never connected, and
//! the geocoder is substituted with [`StaticGeocoder`]. Anything that needs
//! real `PostgreSQL` lives behind `task db:start` workflows instead.
//!
//! # Test Categories
//!
//! - `api_auth_guards` - Session extractor rejections across the API
//! - `webhook_signature` - Payment callback authentication
//! - `geocoder_double` - The injected geocoding capability

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;

use voltcart_storefront::config::{GeocodingConfig, RazorpayConfig, StorefrontConfig};
use voltcart_storefront::services::geocoding::{GeocodingError, ResolvedLocation, ReverseGeocoder};
use voltcart_storefront::services::razorpay::RazorpayClient;
use voltcart_storefront::state::AppState;

/// The webhook secret used by test configs.
pub const TEST_WEBHOOK_SECRET: &str = "vR9mQ2xT7bK4wZ8nJ3fL6hP1sD5gY0cA";

/// A geocoder double returning a fixed location, never touching the network.
pub struct StaticGeocoder {
    pub location: ResolvedLocation,
}

#[async_trait]
impl ReverseGeocoder for StaticGeocoder {
    async fn reverse_geocode(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<ResolvedLocation, GeocodingError> {
        Ok(self.location.clone())
    }
}

/// A geocoder double that always reports zero results.
pub struct EmptyGeocoder;

#[async_trait]
impl ReverseGeocoder for EmptyGeocoder {
    async fn reverse_geocode(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<ResolvedLocation, GeocodingError> {
        Err(GeocodingError::NoResults)
    }
}

/// Build a config that never reaches a real service.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        // Port 9 (discard) refuses connections immediately
        database_url: SecretString::from("postgres://127.0.0.1:9/voltcart_test"),
        host: "127.0.0.1".parse().expect("valid ip"),
        port: 0,
        base_url: "http://localhost:3000".to_owned(),
        session_secret: SecretString::from("aB3xY9mK2nL5pQ7rT0uW4zC6vE8gH1jD"),
        geocoding: GeocodingConfig {
            api_key: SecretString::from("k9mX2qT7bW4zN8vJ3fL6hP1sD5gY0cAr"),
        },
        razorpay: RazorpayConfig {
            key_id: "rzp_test_integration".to_owned(),
            key_secret: SecretString::from(TEST_WEBHOOK_SECRET),
        },
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Build an [`AppState`] over a lazy, never-connected pool and the given
/// geocoder double.
#[must_use]
pub fn test_state(geocoder: Arc<dyn ReverseGeocoder>) -> AppState {
    let config = test_config();
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://127.0.0.1:9/voltcart_test")
        .expect("lazy pool creation cannot fail");
    let razorpay = RazorpayClient::new(&config.razorpay);

    AppState::with_services(config, pool, geocoder, razorpay)
}

/// The full API router over a test state.
#[must_use]
pub fn test_router() -> axum::Router {
    let state = test_state(Arc::new(StaticGeocoder {
        location: ResolvedLocation {
            city: "Mumbai".to_owned(),
            state: "Maharashtra".to_owned(),
            country: "India".to_owned(),
        },
    }));

    voltcart_storefront::routes::routes().with_state(state)
}
