use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::diaries::dtos::{DiaryResponseDto, UpdateDiaryDto};

/// Database model for a diary entry
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Diary {
    pub id: Uuid,
    pub user_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub content: String,
    pub visited_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for inserting a diary entry
#[derive(Debug, Clone)]
pub struct NewDiary {
    pub user_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub content: String,
    pub visited_at: DateTime<Utc>,
}

/// Fields to overwrite on an existing entry; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiaryChanges {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub visited_at: Option<DateTime<Utc>>,
}

impl DiaryChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether applying the changes moves the entry to another coordinate
    pub fn relocates(&self, diary: &Diary) -> bool {
        self.latitude.is_some_and(|lat| lat != diary.latitude)
            || self.longitude.is_some_and(|lng| lng != diary.longitude)
    }

    /// Coordinate of the entry once the changes are applied
    pub fn target_coordinates(&self, diary: &Diary) -> (f64, f64) {
        (
            self.latitude.unwrap_or(diary.latitude),
            self.longitude.unwrap_or(diary.longitude),
        )
    }
}

impl From<UpdateDiaryDto> for DiaryChanges {
    fn from(dto: UpdateDiaryDto) -> Self {
        Self {
            latitude: dto.latitude,
            longitude: dto.longitude,
            title: dto.title,
            content: dto.content,
            visited_at: dto.visited_at,
        }
    }
}

/// Ledger move attached to an update that changes the entry's coordinate.
///
/// The update only applies while the stored coordinate still equals
/// `expected_*`, so two racing relocations cannot both move the same count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relocation {
    pub expected_latitude: f64,
    pub expected_longitude: f64,
    pub from_country_id: Option<i32>,
    pub to_country_id: Option<i32>,
}

impl Relocation {
    pub fn changes_country(&self) -> bool {
        self.from_country_id != self.to_country_id
    }
}

/// Ledger step attached to a delete.
///
/// The delete only applies while the stored coordinate still equals the one
/// `country_id` was resolved from, so a relocation committed in between
/// cannot leave its new country counted with no entry behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Removal {
    pub expected_latitude: f64,
    pub expected_longitude: f64,
    pub country_id: Option<i32>,
}

impl Removal {
    pub fn of(diary: &Diary, country_id: Option<i32>) -> Self {
        Self {
            expected_latitude: diary.latitude,
            expected_longitude: diary.longitude,
            country_id,
        }
    }
}

impl From<Diary> for DiaryResponseDto {
    fn from(d: Diary) -> Self {
        Self {
            id: d.id,
            latitude: d.latitude,
            longitude: d.longitude,
            title: d.title,
            content: d.content,
            visited_at: d.visited_at,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diary() -> Diary {
        let now = Utc::now();
        Diary {
            id: Uuid::new_v4(),
            user_id: "user-1".to_string(),
            latitude: 35.6762,
            longitude: 139.6503,
            title: "Tokyo".to_string(),
            content: "Shibuya crossing".to_string(),
            visited_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_empty_changes() {
        assert!(DiaryChanges::default().is_empty());
        let changes = DiaryChanges {
            title: Some("Kyoto".to_string()),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }

    #[test]
    fn test_relocates_only_on_different_coordinate() {
        let d = diary();

        let same = DiaryChanges {
            latitude: Some(d.latitude),
            longitude: Some(d.longitude),
            ..Default::default()
        };
        assert!(!same.relocates(&d));

        let moved = DiaryChanges {
            longitude: Some(135.5023),
            ..Default::default()
        };
        assert!(moved.relocates(&d));
        assert_eq!(moved.target_coordinates(&d), (35.6762, 135.5023));

        let text_only = DiaryChanges {
            content: Some("Ramen".to_string()),
            ..Default::default()
        };
        assert!(!text_only.relocates(&d));
    }

    #[test]
    fn test_relocation_changes_country() {
        let mut relocation = Relocation {
            expected_latitude: 0.0,
            expected_longitude: 0.0,
            from_country_id: Some(1),
            to_country_id: Some(1),
        };
        assert!(!relocation.changes_country());

        relocation.to_country_id = None;
        assert!(relocation.changes_country());
    }
}
