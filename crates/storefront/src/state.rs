//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::services::geocoding::{GoogleGeocoder, ReverseGeocoder};
use crate::services::razorpay::RazorpayClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and external-service clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    geocoder: Arc<dyn ReverseGeocoder>,
    razorpay: RazorpayClient,
}

impl AppState {
    /// Create a new application state with production service clients.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let geocoder = Arc::new(GoogleGeocoder::new(&config.geocoding));
        let razorpay = RazorpayClient::new(&config.razorpay);

        Self::with_services(config, pool, geocoder, razorpay)
    }

    /// Create application state with explicit service clients.
    ///
    /// Lets tests substitute the geocoder with a double.
    #[must_use]
    pub fn with_services(
        config: StorefrontConfig,
        pool: PgPool,
        geocoder: Arc<dyn ReverseGeocoder>,
        razorpay: RazorpayClient,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                geocoder,
                razorpay,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the reverse geocoder.
    #[must_use]
    pub fn geocoder(&self) -> &Arc<dyn ReverseGeocoder> {
        &self.inner.geocoder
    }

    /// Get a reference to the payment gateway client.
    #[must_use]
    pub fn razorpay(&self) -> &RazorpayClient {
        &self.inner.razorpay
    }
}
