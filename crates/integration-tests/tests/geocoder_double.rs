//! Tests for the injected reverse-geocoding capability.
//!
//! The address workflow depends on `ReverseGeocoder` as a trait object, so
//! a double can stand in for the real HTTP client.

use std::sync::Arc;

use axum::response::IntoResponse;

use voltcart_integration_tests::{EmptyGeocoder, StaticGeocoder, test_state};
use voltcart_storefront::error::AppError;
use voltcart_storefront::services::geocoding::{GeocodingError, ResolvedLocation, ReverseGeocoder};

#[tokio::test]
async fn test_state_uses_the_injected_geocoder() {
    let state = test_state(Arc::new(StaticGeocoder {
        location: ResolvedLocation {
            city: "Bengaluru".to_owned(),
            state: "Karnataka".to_owned(),
            country: "India".to_owned(),
        },
    }));

    let location = state
        .geocoder()
        .reverse_geocode(12.97, 77.59)
        .await
        .expect("static geocoder cannot fail");

    assert_eq!(location.city, "Bengaluru");
    assert_eq!(location.state, "Karnataka");
    assert_eq!(location.country, "India");
}

#[tokio::test]
async fn test_zero_results_surface_as_upstream_failure() {
    let geocoder: Arc<dyn ReverseGeocoder> = Arc::new(EmptyGeocoder);

    let err = geocoder
        .reverse_geocode(0.0, 0.0)
        .await
        .expect_err("empty geocoder always fails");

    assert!(matches!(err, GeocodingError::NoResults));

    // The workflow maps the failure to a 502 so the caller sees an
    // upstream problem, not a validation one
    let response = AppError::from(err).into_response();
    assert_eq!(response.status(), axum::http::StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_unknown_location_is_the_no_coordinates_default() {
    let location = ResolvedLocation::unknown();
    assert_eq!(location.city, "Unknown City");
    assert_eq!(location.state, "Unknown State");
    assert_eq!(location.country, "Unknown Country");
}
