use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::diaries::models::{Diary, DiaryChanges, NewDiary, Relocation, Removal};
use crate::features::visited_countries::ledger;
use crate::features::visited_countries::models::LedgerOp;

/// Diary persistence.
///
/// Each mutating method is one unit of work: the diary row and the ledger
/// adjustment named by its country arguments commit or roll back together.
/// Every lookup is scoped by owner; an entry of another user is reported the
/// same way as a missing one.
#[async_trait]
pub trait DiaryRepository: Send + Sync {
    /// Insert the entry and, when `country_id` is known, increment its ledger row
    async fn create(&self, diary: NewDiary, country_id: Option<i32>) -> Result<Diary>;

    async fn find_by_id(&self, user_id: &str, id: Uuid) -> Result<Option<Diary>>;

    /// Entries of the user, newest visit first
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Diary>>;

    /// Apply `changes`, moving the ledger count when `relocation` says so.
    ///
    /// Returns `None` when no owned entry matched (including a relocation
    /// whose expected coordinate no longer holds).
    async fn update(
        &self,
        user_id: &str,
        id: Uuid,
        changes: DiaryChanges,
        relocation: Option<Relocation>,
    ) -> Result<Option<Diary>>;

    /// Delete the entry while it still sits at the expected coordinate and,
    /// when `removal.country_id` is known, decrement its ledger row.
    ///
    /// Returns whether a row was deleted; `false` covers both a missing entry
    /// and one that was moved since its country was resolved.
    async fn delete(&self, user_id: &str, id: Uuid, removal: Removal) -> Result<bool>;
}

pub struct PgDiaryRepository {
    pool: PgPool,
}

const DIARY_COLUMNS: &str =
    "id, user_id, latitude, longitude, title, content, visited_at, created_at, updated_at";

impl PgDiaryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin transaction: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn commit(tx: Transaction<'static, Postgres>) -> Result<()> {
        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit transaction: {:?}", e);
            AppError::Database(e)
        })
    }
}

#[async_trait]
impl DiaryRepository for PgDiaryRepository {
    async fn create(&self, diary: NewDiary, country_id: Option<i32>) -> Result<Diary> {
        let mut tx = self.begin().await?;

        let query = format!(
            r#"
            INSERT INTO diaries (user_id, latitude, longitude, title, content, visited_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            DIARY_COLUMNS
        );
        let created = sqlx::query_as::<_, Diary>(&query)
            .bind(&diary.user_id)
            .bind(diary.latitude)
            .bind(diary.longitude)
            .bind(&diary.title)
            .bind(&diary.content)
            .bind(diary.visited_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create diary: {:?}", e);
                AppError::Database(e)
            })?;

        if let Some(country_id) = country_id {
            ledger::increment(&mut *tx, &created.user_id, country_id).await?;
        }

        Self::commit(tx).await?;
        Ok(created)
    }

    async fn find_by_id(&self, user_id: &str, id: Uuid) -> Result<Option<Diary>> {
        let query = format!(
            "SELECT {} FROM diaries WHERE id = $1 AND user_id = $2",
            DIARY_COLUMNS
        );
        sqlx::query_as::<_, Diary>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get diary by ID: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Diary>> {
        let query = format!(
            r#"
            SELECT {}
            FROM diaries
            WHERE user_id = $1
            ORDER BY visited_at DESC, created_at DESC
            "#,
            DIARY_COLUMNS
        );
        sqlx::query_as::<_, Diary>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list diaries: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn update(
        &self,
        user_id: &str,
        id: Uuid,
        changes: DiaryChanges,
        relocation: Option<Relocation>,
    ) -> Result<Option<Diary>> {
        let mut tx = self.begin().await?;

        let query = format!(
            r#"
            UPDATE diaries SET
                latitude = COALESCE($3, latitude),
                longitude = COALESCE($4, longitude),
                title = COALESCE($5, title),
                content = COALESCE($6, content),
                visited_at = COALESCE($7, visited_at),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
              AND ($8::DOUBLE PRECISION IS NULL OR latitude = $8)
              AND ($9::DOUBLE PRECISION IS NULL OR longitude = $9)
            RETURNING {}
            "#,
            DIARY_COLUMNS
        );
        let updated = sqlx::query_as::<_, Diary>(&query)
            .bind(id)
            .bind(user_id)
            .bind(changes.latitude)
            .bind(changes.longitude)
            .bind(changes.title)
            .bind(changes.content)
            .bind(changes.visited_at)
            .bind(relocation.map(|r| r.expected_latitude))
            .bind(relocation.map(|r| r.expected_longitude))
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update diary: {:?}", e);
                AppError::Database(e)
            })?;

        let Some(updated) = updated else {
            // Dropping the transaction rolls it back
            return Ok(None);
        };

        if let Some(relocation) = relocation.filter(Relocation::changes_country) {
            // Touch ledger rows in country id order so opposite moves cannot deadlock
            let mut steps = [
                relocation.from_country_id.map(|id| (id, LedgerOp::Decrement)),
                relocation.to_country_id.map(|id| (id, LedgerOp::Increment)),
            ];
            steps.sort_by_key(|step| step.map(|(id, _)| id));

            for (country_id, op) in steps.into_iter().flatten() {
                match op {
                    LedgerOp::Decrement => ledger::decrement(&mut *tx, user_id, country_id).await?,
                    LedgerOp::Increment => ledger::increment(&mut *tx, user_id, country_id).await?,
                };
            }
        }

        Self::commit(tx).await?;
        Ok(Some(updated))
    }

    async fn delete(&self, user_id: &str, id: Uuid, removal: Removal) -> Result<bool> {
        let mut tx = self.begin().await?;

        let result = sqlx::query(
            r#"
            DELETE FROM diaries
            WHERE id = $1 AND user_id = $2
              AND latitude = $3 AND longitude = $4
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(removal.expected_latitude)
        .bind(removal.expected_longitude)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete diary: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        if let Some(country_id) = removal.country_id {
            ledger::decrement(&mut *tx, user_id, country_id).await?;
        }

        Self::commit(tx).await?;
        Ok(true)
    }
}
