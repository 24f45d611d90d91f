use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::countries::{dtos as countries_dtos, handlers as countries_handlers};
use crate::features::diaries::{dtos as diaries_dtos, handlers as diaries_handlers};
use crate::features::visited_countries::{
    dtos as visited_dtos, handlers as visited_handlers,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::get_me,
        // Countries
        countries_handlers::list_countries,
        countries_handlers::get_country,
        // Diaries
        diaries_handlers::list_diaries,
        diaries_handlers::create_diary,
        diaries_handlers::get_diary,
        diaries_handlers::update_diary,
        diaries_handlers::delete_diary,
        // Visited countries
        visited_handlers::list_visited_countries,
        visited_handlers::list_visited_country_codes,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::AuthenticatedUser,
            ApiResponse<auth::model::AuthenticatedUser>,
            // Countries
            countries_dtos::CountryResponseDto,
            ApiResponse<countries_dtos::CountryResponseDto>,
            ApiResponse<Vec<countries_dtos::CountryResponseDto>>,
            // Diaries
            diaries_dtos::CreateDiaryDto,
            diaries_dtos::UpdateDiaryDto,
            diaries_dtos::DiaryResponseDto,
            ApiResponse<diaries_dtos::DiaryResponseDto>,
            ApiResponse<Vec<diaries_dtos::DiaryResponseDto>>,
            // Visited countries
            visited_dtos::VisitedCountryResponseDto,
            visited_dtos::VisitedCountryCodesDto,
            ApiResponse<Vec<visited_dtos::VisitedCountryResponseDto>>,
            ApiResponse<visited_dtos::VisitedCountryCodesDto>,
        )
    ),
    tags(
        (name = "auth", description = "Authenticated identity"),
        (name = "countries", description = "Country reference list (public)"),
        (name = "diaries", description = "Geotagged travel diary entries"),
        (name = "visited-countries", description = "Countries visited by the user, with diary counts"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Travel Journal API",
        version = "0.1.0",
        description = "API documentation for the travel journal",
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
