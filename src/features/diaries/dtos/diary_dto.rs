use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::shared::validation::not_blank;

/// Request DTO for creating a diary entry
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiaryDto {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: f64,

    #[validate(
        length(min = 1, max = 255, message = "Title must be 1-255 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,

    #[validate(
        length(min = 1, max = 10000, message = "Content must be 1-10000 characters"),
        custom(function = "not_blank")
    )]
    pub content: String,

    /// When the place was visited
    pub visited_at: DateTime<Utc>,
}

/// Request DTO for partially updating a diary entry.
///
/// Only the supplied fields are validated and changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDiaryDto {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,

    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: Option<f64>,

    #[validate(
        length(min = 1, max = 255, message = "Title must be 1-255 characters"),
        custom(function = "not_blank")
    )]
    pub title: Option<String>,

    #[validate(
        length(min = 1, max = 10000, message = "Content must be 1-10000 characters"),
        custom(function = "not_blank")
    )]
    pub content: Option<String>,

    pub visited_at: Option<DateTime<Utc>>,
}

/// Response DTO for a diary entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiaryResponseDto {
    pub id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub content: String,
    pub visited_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
