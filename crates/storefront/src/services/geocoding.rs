//! Reverse geocoding behind an injectable capability.
//!
//! Address creation needs city/state/country for a coordinate pair. The
//! lookup is modeled as the [`ReverseGeocoder`] trait so the workflow can
//! be exercised with a test double instead of a live HTTP call; the
//! production implementation is [`GoogleGeocoder`].

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

use crate::config::GeocodingConfig;

/// Geocoding API base URL.
const BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Fallback when the result has no matching component.
const UNKNOWN_CITY: &str = "Unknown City";
const UNKNOWN_STATE: &str = "Unknown State";
const UNKNOWN_COUNTRY: &str = "Unknown Country";

/// Errors that can occur during a reverse-geocoding lookup.
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The service returned zero results for the coordinates.
    #[error("no location found for the given latitude and longitude")]
    NoResults,

    /// Failed to parse the response body.
    #[error("parse error: {0}")]
    Parse(String),
}

/// City/state/country resolved from a coordinate pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub city: String,
    pub state: String,
    pub country: String,
}

impl ResolvedLocation {
    /// The location stored when no coordinates were supplied.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            city: UNKNOWN_CITY.to_owned(),
            state: UNKNOWN_STATE.to_owned(),
            country: UNKNOWN_COUNTRY.to_owned(),
        }
    }
}

/// Capability for translating coordinates into an administrative location.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Resolve `latitude`/`longitude` into city, state, and country.
    ///
    /// # Errors
    ///
    /// Returns `GeocodingError::NoResults` when the service knows nothing
    /// about the coordinates, and transport/parse variants otherwise.
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ResolvedLocation, GeocodingError>;
}

/// Google Maps Geocoding API client.
#[derive(Clone)]
pub struct GoogleGeocoder {
    client: reqwest::Client,
    api_key: SecretString,
}

impl GoogleGeocoder {
    /// Create a new geocoder from configuration.
    #[must_use]
    pub fn new(config: &GeocodingConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl ReverseGeocoder for GoogleGeocoder {
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ResolvedLocation, GeocodingError> {
        let url = format!(
            "{BASE_URL}?latlng={latitude},{longitude}&key={}",
            urlencoding::encode(self.api_key.expose_secret())
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeocodingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| GeocodingError::Parse(e.to_string()))?;

        resolve_components(&body.results)
    }
}

/// Extract city/state/country from geocoding results.
///
/// Only the first result is consulted, and for each component type the
/// first matching component wins. Missing components fall back to the
/// "Unknown ..." defaults rather than failing the lookup.
fn resolve_components(results: &[GeocodeResult]) -> Result<ResolvedLocation, GeocodingError> {
    let first = results.first().ok_or(GeocodingError::NoResults)?;

    let component = |kind: &str| {
        first
            .address_components
            .iter()
            .find(|c| c.types.iter().any(|t| t == kind))
            .map(|c| c.long_name.clone())
    };

    Ok(ResolvedLocation {
        city: component("locality").unwrap_or_else(|| UNKNOWN_CITY.to_owned()),
        state: component("administrative_area_level_1")
            .unwrap_or_else(|| UNKNOWN_STATE.to_owned()),
        country: component("country").unwrap_or_else(|| UNKNOWN_COUNTRY.to_owned()),
    })
}

/// Top-level geocoding response.
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

/// One geocoding result.
#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    address_components: Vec<AddressComponent>,
}

/// One typed address component of a result.
#[derive(Debug, Deserialize)]
struct AddressComponent {
    long_name: String,
    #[serde(default)]
    types: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Vec<GeocodeResult> {
        serde_json::from_str::<GeocodeResponse>(json).unwrap().results
    }

    #[test]
    fn test_resolve_full_components() {
        let results = parse(
            r#"{"results": [{"address_components": [
                {"long_name": "Mumbai", "types": ["locality", "political"]},
                {"long_name": "Maharashtra", "types": ["administrative_area_level_1"]},
                {"long_name": "India", "types": ["country", "political"]}
            ]}]}"#,
        );

        let location = resolve_components(&results).unwrap();
        assert_eq!(location.city, "Mumbai");
        assert_eq!(location.state, "Maharashtra");
        assert_eq!(location.country, "India");
    }

    #[test]
    fn test_resolve_first_match_per_type_wins() {
        let results = parse(
            r#"{"results": [{"address_components": [
                {"long_name": "Pune", "types": ["locality"]},
                {"long_name": "Pimpri", "types": ["locality"]},
                {"long_name": "Maharashtra", "types": ["administrative_area_level_1"]},
                {"long_name": "India", "types": ["country"]}
            ]}]}"#,
        );

        let location = resolve_components(&results).unwrap();
        assert_eq!(location.city, "Pune");
    }

    #[test]
    fn test_resolve_missing_components_default_to_unknown() {
        let results = parse(
            r#"{"results": [{"address_components": [
                {"long_name": "India", "types": ["country"]}
            ]}]}"#,
        );

        let location = resolve_components(&results).unwrap();
        assert_eq!(location.city, "Unknown City");
        assert_eq!(location.state, "Unknown State");
        assert_eq!(location.country, "India");
    }

    #[test]
    fn test_resolve_only_first_result_is_consulted() {
        let results = parse(
            r#"{"results": [
                {"address_components": []},
                {"address_components": [{"long_name": "Delhi", "types": ["locality"]}]}
            ]}"#,
        );

        let location = resolve_components(&results).unwrap();
        assert_eq!(location.city, "Unknown City");
    }

    #[test]
    fn test_resolve_zero_results_is_an_error() {
        let results = parse(r#"{"results": []}"#);
        assert!(matches!(
            resolve_components(&results),
            Err(GeocodingError::NoResults)
        ));
    }

    #[test]
    fn test_unknown_location_defaults() {
        let location = ResolvedLocation::unknown();
        assert_eq!(location.city, "Unknown City");
        assert_eq!(location.state, "Unknown State");
        assert_eq!(location.country, "Unknown Country");
    }
}
