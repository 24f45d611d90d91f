use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppPath;
use crate::features::countries::dtos::CountryResponseDto;
use crate::features::countries::services::CountryService;
use crate::shared::types::{ApiResponse, Meta};

/// List reference countries
#[utoipa::path(
    get,
    path = "/api/countries",
    responses(
        (status = 200, description = "Countries ordered by name", body = ApiResponse<Vec<CountryResponseDto>>),
    ),
    tag = "countries"
)]
pub async fn list_countries(
    State(service): State<Arc<CountryService>>,
) -> Result<Json<ApiResponse<Vec<CountryResponseDto>>>> {
    let countries = service.list().await?;
    let meta = Meta::total(countries.len());
    Ok(Json(ApiResponse::success(Some(countries), None, Some(meta))))
}

/// Get a country by ISO alpha-2 code
#[utoipa::path(
    get,
    path = "/api/countries/{code}",
    params(
        ("code" = String, Path, description = "ISO 3166-1 alpha-2 code, case-insensitive")
    ),
    responses(
        (status = 200, description = "Country found", body = ApiResponse<CountryResponseDto>),
        (status = 400, description = "Malformed country code"),
        (status = 404, description = "Country not found")
    ),
    tag = "countries"
)]
pub async fn get_country(
    State(service): State<Arc<CountryService>>,
    AppPath(code): AppPath<String>,
) -> Result<Json<ApiResponse<CountryResponseDto>>> {
    let country = service.get_by_code(&code).await?;
    Ok(Json(ApiResponse::success(Some(country), None, None)))
}
