use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::countries::dtos::CountryResponseDto;
use crate::features::countries::repository::CountryRepository;
use crate::shared::validation::COUNTRY_CODE_REGEX;

/// Service for the country reference list
pub struct CountryService {
    repository: Arc<dyn CountryRepository>,
}

impl CountryService {
    pub fn new(repository: Arc<dyn CountryRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Result<Vec<CountryResponseDto>> {
        let countries = self.repository.list().await?;
        Ok(countries.into_iter().map(Into::into).collect())
    }

    /// Get a country by ISO alpha-2 code (case-insensitive)
    pub async fn get_by_code(&self, code: &str) -> Result<CountryResponseDto> {
        let code = code.trim();
        if !COUNTRY_CODE_REGEX.is_match(code) {
            return Err(AppError::BadRequest(format!(
                "Invalid country code '{}': expected ISO 3166-1 alpha-2",
                code
            )));
        }

        let normalized = code.to_ascii_uppercase();
        self.repository
            .find_by_code(&normalized)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Country '{}' not found", normalized)))
    }
}
