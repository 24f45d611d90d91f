use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::visited_countries::dtos::{
    VisitedCountryCodesDto, VisitedCountryResponseDto,
};
use crate::features::visited_countries::services::VisitedCountryService;
use crate::shared::types::{ApiResponse, Meta};

/// List countries the user has diary entries in
#[utoipa::path(
    get,
    path = "/api/visited-countries",
    responses(
        (status = 200, description = "Visited countries with diary counts", body = ApiResponse<Vec<VisitedCountryResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "visited-countries"
)]
pub async fn list_visited_countries(
    user: AuthenticatedUser,
    State(service): State<Arc<VisitedCountryService>>,
) -> Result<Json<ApiResponse<Vec<VisitedCountryResponseDto>>>> {
    let visited = service.list(user.user_id()).await?;
    let meta = Meta::total(visited.len());
    Ok(Json(ApiResponse::success(Some(visited), None, Some(meta))))
}

/// Visited country codes for map highlighting
#[utoipa::path(
    get,
    path = "/api/visited-countries/codes",
    responses(
        (status = 200, description = "ISO alpha-2 codes of visited countries", body = ApiResponse<VisitedCountryCodesDto>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "visited-countries"
)]
pub async fn list_visited_country_codes(
    user: AuthenticatedUser,
    State(service): State<Arc<VisitedCountryService>>,
) -> Result<Json<ApiResponse<VisitedCountryCodesDto>>> {
    let codes = service.codes(user.user_id()).await?;
    Ok(Json(ApiResponse::success(Some(codes), None, None)))
}
