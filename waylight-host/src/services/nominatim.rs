//! Nominatim geocoding backend
//!
//! Resolves a free-form address through the OpenStreetMap Nominatim
//! search API. One blocking request per resolution with an explicit
//! timeout, so a slow network bounds the caller's wait instead of
//! hanging it; no retry, a failure goes back to the operator.

use std::time::Duration;

use serde::Deserialize;

use waylight_core::geo::Coordinate;
use waylight_core::traits::geocode::{GeocodeError, Geocoder};

/// Public Nominatim search endpoint
pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

/// Request timeout; also the bound on how long `resolve` can block
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("waylight/", env!("CARGO_PKG_VERSION"));

/// One search hit; Nominatim encodes coordinates as strings
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// Blocking Nominatim client
pub struct NominatimGeocoder {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl NominatimGeocoder {
    /// Client against the public endpoint
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Client against a custom endpoint (self-hosted instance, tests)
    pub fn with_endpoint(endpoint: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());

        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }

    /// Decode a search response body into the best-match coordinate
    fn parse_response(body: &str) -> Result<Coordinate, GeocodeError> {
        let places: Vec<Place> =
            serde_json::from_str(body).map_err(|_| GeocodeError::InvalidResponse)?;
        let place = places.first().ok_or(GeocodeError::NoMatch)?;

        let lat: f64 = place
            .lat
            .parse()
            .map_err(|_| GeocodeError::InvalidResponse)?;
        let lon: f64 = place
            .lon
            .parse()
            .map_err(|_| GeocodeError::InvalidResponse)?;

        let coord = Coordinate::new(lat, lon);
        if !coord.is_valid() {
            return Err(GeocodeError::InvalidResponse);
        }
        Ok(coord)
    }
}

impl Default for NominatimGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Geocoder for NominatimGeocoder {
    fn resolve(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("format", "json"), ("limit", "1"), ("q", address)])
            .send()
            .map_err(|e| {
                log::warn!("geocoding request failed: {e}");
                GeocodeError::Network
            })?;

        if !response.status().is_success() {
            log::warn!("geocoding returned HTTP {}", response.status());
            return Err(GeocodeError::Network);
        }

        let body = response.text().map_err(|_| GeocodeError::Network)?;
        Self::parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_first_search_hit() {
        let body = r#"[
            {"place_id": 1, "lat": "49.2827", "lon": "-123.1207", "display_name": "Vancouver"},
            {"place_id": 2, "lat": "37.0", "lon": "-122.0", "display_name": "Elsewhere"}
        ]"#;
        let coord = NominatimGeocoder::parse_response(body).unwrap();
        assert_eq!(coord, Coordinate::new(49.2827, -123.1207));
    }

    #[test]
    fn empty_result_set_is_no_match() {
        assert_eq!(
            NominatimGeocoder::parse_response("[]"),
            Err(GeocodeError::NoMatch)
        );
    }

    #[test]
    fn garbage_body_is_invalid_response() {
        assert_eq!(
            NominatimGeocoder::parse_response("<html>rate limited</html>"),
            Err(GeocodeError::InvalidResponse)
        );
    }

    #[test]
    fn unparseable_coordinates_are_invalid_response() {
        let body = r#"[{"lat": "not-a-number", "lon": "-123.0"}]"#;
        assert_eq!(
            NominatimGeocoder::parse_response(body),
            Err(GeocodeError::InvalidResponse)
        );
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let body = r#"[{"lat": "95.0", "lon": "-123.0"}]"#;
        assert_eq!(
            NominatimGeocoder::parse_response(body),
            Err(GeocodeError::InvalidResponse)
        );
    }
}
