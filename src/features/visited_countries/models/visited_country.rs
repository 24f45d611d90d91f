use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::countries::dtos::CountryResponseDto;
use crate::features::visited_countries::dtos::VisitedCountryResponseDto;

/// Ledger row joined with its country's display attributes
#[derive(Debug, Clone, FromRow)]
pub struct VisitedCountryDetail {
    pub country_id: i32,
    pub code: String,
    pub name: String,
    pub native_name: Option<String>,
    pub boundary_ref: Option<String>,
    pub diary_count: i32,
    pub last_verified_at: DateTime<Utc>,
}

impl From<VisitedCountryDetail> for VisitedCountryResponseDto {
    fn from(v: VisitedCountryDetail) -> Self {
        Self {
            country: CountryResponseDto {
                id: v.country_id,
                code: v.code,
                name: v.name,
                native_name: v.native_name,
                boundary_ref: v.boundary_ref,
            },
            diary_count: v.diary_count,
            last_verified_at: v.last_verified_at,
        }
    }
}
