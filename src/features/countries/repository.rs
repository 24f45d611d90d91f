use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::countries::models::Country;

/// Read-only access to the country reference table
#[async_trait]
pub trait CountryRepository: Send + Sync {
    /// All countries ordered by name
    async fn list(&self) -> Result<Vec<Country>>;

    /// Look up a country by its upper-case ISO alpha-2 code
    async fn find_by_code(&self, code: &str) -> Result<Option<Country>>;
}

pub struct PgCountryRepository {
    pool: PgPool,
}

impl PgCountryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CountryRepository for PgCountryRepository {
    async fn list(&self) -> Result<Vec<Country>> {
        sqlx::query_as::<_, Country>(
            r#"
            SELECT id, code, name, native_name, boundary_ref
            FROM countries
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list countries: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Country>> {
        sqlx::query_as::<_, Country>(
            r#"
            SELECT id, code, name, native_name, boundary_ref
            FROM countries
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to find country by code: {:?}", e);
            AppError::Database(e)
        })
    }
}
