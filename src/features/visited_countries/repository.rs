use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::visited_countries::models::VisitedCountryDetail;

/// Read side of the visited-country ledger.
///
/// Writes go through `ledger::{increment, decrement}` within diary
/// transactions, never through this trait.
#[async_trait]
pub trait VisitedCountryRepository: Send + Sync {
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<VisitedCountryDetail>>;

    async fn codes_by_user(&self, user_id: &str) -> Result<Vec<String>>;
}

pub struct PgVisitedCountryRepository {
    pool: PgPool,
}

impl PgVisitedCountryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitedCountryRepository for PgVisitedCountryRepository {
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<VisitedCountryDetail>> {
        sqlx::query_as::<_, VisitedCountryDetail>(
            r#"
            SELECT
                c.id AS country_id, c.code, c.name, c.native_name, c.boundary_ref,
                v.diary_count, v.last_verified_at
            FROM visited_countries v
            JOIN countries c ON c.id = v.country_id
            WHERE v.user_id = $1
            ORDER BY c.name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list visited countries: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn codes_by_user(&self, user_id: &str) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT c.code
            FROM visited_countries v
            JOIN countries c ON c.id = v.country_id
            WHERE v.user_id = $1
            ORDER BY c.code ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list visited country codes: {:?}", e);
            AppError::Database(e)
        })
    }
}
