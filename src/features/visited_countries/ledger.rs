//! PostgreSQL ledger primitives.
//!
//! Each primitive runs on the caller's connection so that it commits or rolls
//! back together with the diary mutation that triggered it. Always call them
//! inside a transaction: `decrement` relies on the row lock it takes being
//! held until commit.

use sqlx::PgConnection;

use crate::core::error::{AppError, Result};
use crate::features::visited_countries::models::{next_count, LedgerChange, LedgerOp};

/// Create the (user, country) row with count 1, or add one to it.
///
/// A single upsert statement, so concurrent increments never lose updates.
/// `last_verified_at` is only set when the row is created.
pub async fn increment(
    conn: &mut PgConnection,
    user_id: &str,
    country_id: i32,
) -> Result<LedgerChange> {
    let diary_count: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO visited_countries (user_id, country_id, diary_count, last_verified_at)
        VALUES ($1, $2, 1, NOW())
        ON CONFLICT (user_id, country_id)
        DO UPDATE SET diary_count = visited_countries.diary_count + 1
        RETURNING diary_count
        "#,
    )
    .bind(user_id)
    .bind(country_id)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| {
        tracing::error!("Failed to increment visited country: {:?}", e);
        AppError::Database(e)
    })?;

    let change = if diary_count == 1 {
        LedgerChange::Created
    } else {
        LedgerChange::Incremented { diary_count }
    };

    tracing::debug!(
        "Ledger increment: user={}, country_id={}, change={:?}",
        user_id,
        country_id,
        change
    );

    Ok(change)
}

/// Remove one from the (user, country) row, deleting it instead of storing zero.
///
/// The row is locked with `FOR UPDATE` before the write, so two concurrent
/// decrements from 2 end at "absent", never at a stale 1. Decrementing an
/// absent row is a no-op.
pub async fn decrement(
    conn: &mut PgConnection,
    user_id: &str,
    country_id: i32,
) -> Result<LedgerChange> {
    let current: Option<i32> = sqlx::query_scalar(
        r#"
        SELECT diary_count
        FROM visited_countries
        WHERE user_id = $1 AND country_id = $2
        FOR UPDATE
        "#,
    )
    .bind(user_id)
    .bind(country_id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| {
        tracing::error!("Failed to lock visited country: {:?}", e);
        AppError::Database(e)
    })?;

    let next = next_count(current, LedgerOp::Decrement);

    match (current, next) {
        (Some(_), Some(diary_count)) => {
            sqlx::query(
                r#"
                UPDATE visited_countries
                SET diary_count = $3
                WHERE user_id = $1 AND country_id = $2
                "#,
            )
            .bind(user_id)
            .bind(country_id)
            .bind(diary_count)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to decrement visited country: {:?}", e);
                AppError::Database(e)
            })?;
        }
        (Some(_), None) => {
            sqlx::query(
                r#"
                DELETE FROM visited_countries
                WHERE user_id = $1 AND country_id = $2
                "#,
            )
            .bind(user_id)
            .bind(country_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                tracing::error!("Failed to remove visited country: {:?}", e);
                AppError::Database(e)
            })?;
        }
        (None, _) => {
            tracing::warn!(
                "Ledger decrement on absent row: user={}, country_id={}",
                user_id,
                country_id
            );
        }
    }

    let change = LedgerChange::between(current, next);
    tracing::debug!(
        "Ledger decrement: user={}, country_id={}, change={:?}",
        user_id,
        country_id,
        change
    );

    Ok(change)
}
