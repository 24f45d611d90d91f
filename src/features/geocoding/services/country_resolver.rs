use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::features::countries::models::Country;
use crate::features::countries::repository::CountryRepository;
use crate::features::geocoding::clients::ReverseGeocoder;
use crate::features::geocoding::RequestSpacer;
use crate::shared::validation::COUNTRY_CODE_REGEX;

/// Maps a coordinate to a reference country.
///
/// Never fails: every failure mode is reported as `None` and logged by the
/// implementation.
#[async_trait]
pub trait CountryResolver: Send + Sync {
    async fn resolve(&self, latitude: f64, longitude: f64) -> Option<Country>;
}

/// Resolver chaining a reverse geocoder with the country reference table.
///
/// Upstream calls are spaced by `min_interval`. The timeout starts once a
/// call is released, so time spent queueing behind other lookups never
/// counts against it.
pub struct GeocodingCountryResolver {
    geocoder: Arc<dyn ReverseGeocoder>,
    countries: Arc<dyn CountryRepository>,
    timeout: Duration,
    spacer: RequestSpacer,
}

impl GeocodingCountryResolver {
    pub fn new(
        geocoder: Arc<dyn ReverseGeocoder>,
        countries: Arc<dyn CountryRepository>,
        timeout: Duration,
    ) -> Self {
        Self {
            geocoder,
            countries,
            timeout,
            spacer: RequestSpacer::new(Duration::ZERO),
        }
    }

    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.spacer = RequestSpacer::new(min_interval);
        self
    }
}

#[async_trait]
impl CountryResolver for GeocodingCountryResolver {
    async fn resolve(&self, latitude: f64, longitude: f64) -> Option<Country> {
        self.spacer.acquire().await;
        let lookup = self.geocoder.country_code(latitude, longitude);

        let code = match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(Some(code))) => code.trim().to_ascii_uppercase(),
            Ok(Ok(None)) => {
                tracing::info!("No country found for ({}, {})", latitude, longitude);
                return None;
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    "Country resolution failed for ({}, {}): {}",
                    latitude,
                    longitude,
                    e
                );
                return None;
            }
            Err(_) => {
                tracing::warn!(
                    "Country resolution timed out after {:?} for ({}, {})",
                    self.timeout,
                    latitude,
                    longitude
                );
                return None;
            }
        };

        if !COUNTRY_CODE_REGEX.is_match(&code) {
            tracing::warn!("Geocoder returned malformed country code '{}'", code);
            return None;
        }

        match self.countries.find_by_code(&code).await {
            Ok(Some(country)) => {
                tracing::debug!(
                    "Resolved ({}, {}) -> {} (id={})",
                    latitude,
                    longitude,
                    country.code,
                    country.id
                );
                Some(country)
            }
            Ok(None) => {
                tracing::warn!("Country code '{}' is not in the reference table", code);
                None
            }
            Err(e) => {
                tracing::warn!("Failed to map country code '{}': {}", code, e);
                None
            }
        }
    }
}
