use std::sync::Arc;

use crate::core::error::Result;
use crate::features::visited_countries::dtos::{
    VisitedCountryCodesDto, VisitedCountryResponseDto,
};
use crate::features::visited_countries::repository::VisitedCountryRepository;

/// Query side of the visited-country ledger
pub struct VisitedCountryService {
    repository: Arc<dyn VisitedCountryRepository>,
}

impl VisitedCountryService {
    pub fn new(repository: Arc<dyn VisitedCountryRepository>) -> Self {
        Self { repository }
    }

    /// All ledger rows of the user with their country attributes
    pub async fn list(&self, user_id: &str) -> Result<Vec<VisitedCountryResponseDto>> {
        let rows = self.repository.list_by_user(user_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Visited ISO codes, for map highlighting
    pub async fn codes(&self, user_id: &str) -> Result<VisitedCountryCodesDto> {
        let codes = self.repository.codes_by_user(user_id).await?;
        Ok(VisitedCountryCodesDto { codes })
    }
}
