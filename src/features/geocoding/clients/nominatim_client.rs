use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::core::config::GeocodingConfig;

/// Errors raised while talking to a reverse geocoding provider
#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("Failed to build geocoding client: {0}")]
    Client(String),

    #[error("Geocoding request failed: {0}")]
    Request(String),

    #[error("Geocoding provider returned status {0}")]
    Status(u16),

    #[error("Failed to parse geocoding response: {0}")]
    Parse(String),
}

/// Reverse geocoding port: coordinate to ISO alpha-2 country code.
///
/// `Ok(None)` means the provider answered but found no country (open sea,
/// Antarctica, ...).
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn country_code(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<String>, GeocodingError>;
}

/// Nominatim `/reverse` response (only the fields we read)
#[derive(Debug, Deserialize)]
pub struct NominatimReverseResponse {
    pub display_name: Option<String>,
    pub address: Option<NominatimAddress>,
    /// Present instead of a result, e.g. "Unable to geocode"
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NominatimAddress {
    pub country: Option<String>,
    pub country_code: Option<String>,
}

impl NominatimReverseResponse {
    pub fn country_code(&self) -> Option<String> {
        if self.error.is_some() {
            return None;
        }
        self.address
            .as_ref()
            .and_then(|a| a.country_code.as_deref())
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_ascii_uppercase)
    }
}

/// Reverse geocoder backed by Nominatim
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodingError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeocodingError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn reverse_url(&self, latitude: f64, longitude: f64) -> String {
        // zoom=3 asks for country-level detail only
        format!(
            "{}/reverse?format=jsonv2&lat={}&lon={}&zoom=3&addressdetails=1",
            self.base_url, latitude, longitude
        )
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    async fn country_code(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<String>, GeocodingError> {
        let url = self.reverse_url(latitude, longitude);
        tracing::debug!("Reverse geocoding ({}, {}) -> {}", latitude, longitude, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GeocodingError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodingError::Status(status.as_u16()));
        }

        let body: NominatimReverseResponse = response
            .json()
            .await
            .map_err(|e| GeocodingError::Parse(e.to_string()))?;

        if let Some(reason) = &body.error {
            tracing::debug!(
                "Nominatim found no place for ({}, {}): {}",
                latitude,
                longitude,
                reason
            );
        } else {
            tracing::debug!(
                place = ?body.display_name,
                country = ?body.address.as_ref().and_then(|a| a.country.as_deref()),
                "Nominatim reverse lookup succeeded"
            );
        }

        Ok(body.country_code())
    }
}
