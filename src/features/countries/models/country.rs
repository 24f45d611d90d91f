use sqlx::FromRow;

use crate::features::countries::dtos::CountryResponseDto;

/// Database model for a reference country
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Country {
    pub id: i32,
    /// ISO 3166-1 alpha-2, upper-case
    pub code: String,
    pub name: String,
    pub native_name: Option<String>,
    /// Pointer to the boundary geometry used by map rendering
    pub boundary_ref: Option<String>,
}

impl From<Country> for CountryResponseDto {
    fn from(c: Country) -> Self {
        Self {
            id: c.id,
            code: c.code,
            name: c.name,
            native_name: c.native_name,
            boundary_ref: c.boundary_ref,
        }
    }
}
