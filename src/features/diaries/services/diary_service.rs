use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::diaries::dtos::{CreateDiaryDto, DiaryResponseDto, UpdateDiaryDto};
use crate::features::diaries::models::{Diary, DiaryChanges, NewDiary, Relocation, Removal};
use crate::features::diaries::repository::DiaryRepository;
use crate::features::geocoding::CountryResolver;

/// Service for diary entries and the ledger updates they drive
pub struct DiaryService {
    repository: Arc<dyn DiaryRepository>,
    resolver: Arc<dyn CountryResolver>,
}

impl DiaryService {
    pub fn new(repository: Arc<dyn DiaryRepository>, resolver: Arc<dyn CountryResolver>) -> Self {
        Self {
            repository,
            resolver,
        }
    }

    /// Create an entry; when its coordinate resolves to a country, count it there.
    ///
    /// Resolution happens before the write so no transaction is held open
    /// across the geocoding call. An unresolved coordinate still creates the
    /// entry.
    pub async fn create(&self, user_id: &str, dto: CreateDiaryDto) -> Result<DiaryResponseDto> {
        dto.validate()?;

        let country = self.resolver.resolve(dto.latitude, dto.longitude).await;

        let diary = self
            .repository
            .create(
                NewDiary {
                    user_id: user_id.to_string(),
                    latitude: dto.latitude,
                    longitude: dto.longitude,
                    title: dto.title,
                    content: dto.content,
                    visited_at: dto.visited_at,
                },
                country.as_ref().map(|c| c.id),
            )
            .await?;

        tracing::info!(
            "Diary created: id={}, user={}, country={}",
            diary.id,
            user_id,
            country.as_ref().map_or("-", |c| c.code.as_str())
        );

        Ok(diary.into())
    }

    /// Get an owned entry
    pub async fn get(&self, user_id: &str, id: Uuid) -> Result<DiaryResponseDto> {
        self.find_owned(user_id, id).await.map(Into::into)
    }

    /// All entries of the user, newest first
    pub async fn list(&self, user_id: &str) -> Result<Vec<DiaryResponseDto>> {
        let diaries = self.repository.list_by_user(user_id).await?;
        Ok(diaries.into_iter().map(Into::into).collect())
    }

    /// Apply the supplied fields to an owned entry.
    ///
    /// A coordinate change re-resolves both the old and the new coordinate and
    /// moves the ledger count when the country differs.
    pub async fn update(
        &self,
        user_id: &str,
        id: Uuid,
        dto: UpdateDiaryDto,
    ) -> Result<DiaryResponseDto> {
        dto.validate()?;

        let current = self.find_owned(user_id, id).await?;
        let changes = DiaryChanges::from(dto);
        if changes.is_empty() {
            return Ok(current.into());
        }

        let relocation = if changes.relocates(&current) {
            Some(self.plan_relocation(&current, &changes).await)
        } else {
            None
        };

        let updated = self
            .repository
            .update(user_id, id, changes, relocation)
            .await?;

        if let Some(diary) = updated {
            tracing::info!(
                "Diary updated: id={}, user={}, relocation={:?}",
                diary.id,
                user_id,
                relocation
            );
            return Ok(diary.into());
        }

        // A relocation misses when the stored coordinate moved under us
        let still_exists = relocation.is_some()
            && self.repository.find_by_id(user_id, id).await?.is_some();
        if still_exists {
            tracing::warn!("Diary relocation conflict: id={}, user={}", id, user_id);
            return Err(AppError::Conflict(format!(
                "Diary '{}' was modified concurrently, retry the update",
                id
            )));
        }

        Err(not_found(id))
    }

    /// Delete an owned entry and stop counting it in its country.
    ///
    /// The coordinate is re-resolved rather than read from a cache, and the
    /// delete only applies while the entry still sits at that coordinate.
    pub async fn delete(&self, user_id: &str, id: Uuid) -> Result<()> {
        let diary = self.find_owned(user_id, id).await?;

        let country = self.resolver.resolve(diary.latitude, diary.longitude).await;

        let removal = Removal::of(&diary, country.as_ref().map(|c| c.id));
        let deleted = self.repository.delete(user_id, id, removal).await?;
        if !deleted {
            // Either another delete won, or a relocation moved the entry after
            // its country was resolved
            if self.repository.find_by_id(user_id, id).await?.is_some() {
                tracing::warn!("Diary delete conflict: id={}, user={}", id, user_id);
                return Err(AppError::Conflict(format!(
                    "Diary '{}' was modified concurrently, retry the delete",
                    id
                )));
            }
            return Err(not_found(id));
        }

        tracing::info!(
            "Diary deleted: id={}, user={}, country={}",
            id,
            user_id,
            country.as_ref().map_or("-", |c| c.code.as_str())
        );

        Ok(())
    }

    async fn find_owned(&self, user_id: &str, id: Uuid) -> Result<Diary> {
        self.repository
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn plan_relocation(&self, current: &Diary, changes: &DiaryChanges) -> Relocation {
        let (latitude, longitude) = changes.target_coordinates(current);

        let from = self
            .resolver
            .resolve(current.latitude, current.longitude)
            .await;
        let to = self.resolver.resolve(latitude, longitude).await;

        Relocation {
            expected_latitude: current.latitude,
            expected_longitude: current.longitude,
            from_country_id: from.map(|c| c.id),
            to_country_id: to.map(|c| c.id),
        }
    }
}

/// Same error whether the entry is missing or owned by someone else
fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Diary '{}' not found", id))
}
