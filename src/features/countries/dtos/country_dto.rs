use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response DTO for a country
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountryResponseDto {
    pub id: i32,
    /// ISO 3166-1 alpha-2 code (e.g. "JP")
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary_ref: Option<String>,
}
