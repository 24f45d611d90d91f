use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::countries::dtos::CountryResponseDto;

/// A country the user has at least one diary entry in
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitedCountryResponseDto {
    pub country: CountryResponseDto,
    /// Number of the user's diary entries resolved to this country (always >= 1)
    pub diary_count: i32,
    pub last_verified_at: DateTime<Utc>,
}

/// Visited country codes for map highlighting
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitedCountryCodesDto {
    pub codes: Vec<String>,
}
