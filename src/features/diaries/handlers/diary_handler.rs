use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::diaries::dtos::{CreateDiaryDto, DiaryResponseDto, UpdateDiaryDto};
use crate::features::diaries::services::DiaryService;
use crate::shared::types::{ApiResponse, Meta};

/// List own diary entries
#[utoipa::path(
    get,
    path = "/api/diaries",
    responses(
        (status = 200, description = "Entries ordered by visit date, newest first", body = ApiResponse<Vec<DiaryResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "diaries"
)]
pub async fn list_diaries(
    user: AuthenticatedUser,
    State(service): State<Arc<DiaryService>>,
) -> Result<Json<ApiResponse<Vec<DiaryResponseDto>>>> {
    let diaries = service.list(user.user_id()).await?;
    let meta = Meta::total(diaries.len());
    Ok(Json(ApiResponse::success(Some(diaries), None, Some(meta))))
}

/// Create a diary entry
#[utoipa::path(
    post,
    path = "/api/diaries",
    request_body = CreateDiaryDto,
    responses(
        (status = 201, description = "Entry created", body = ApiResponse<DiaryResponseDto>),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "diaries"
)]
pub async fn create_diary(
    user: AuthenticatedUser,
    State(service): State<Arc<DiaryService>>,
    AppJson(dto): AppJson<CreateDiaryDto>,
) -> Result<(StatusCode, Json<ApiResponse<DiaryResponseDto>>)> {
    let diary = service.create(user.user_id(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(diary),
            Some("Diary created successfully".to_string()),
            None,
        )),
    ))
}

/// Get an own diary entry
#[utoipa::path(
    get,
    path = "/api/diaries/{id}",
    params(
        ("id" = Uuid, Path, description = "Diary ID")
    ),
    responses(
        (status = 200, description = "Entry found", body = ApiResponse<DiaryResponseDto>),
        (status = 400, description = "Malformed diary ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Entry not found")
    ),
    security(("bearer_auth" = [])),
    tag = "diaries"
)]
pub async fn get_diary(
    user: AuthenticatedUser,
    State(service): State<Arc<DiaryService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<DiaryResponseDto>>> {
    let diary = service.get(user.user_id(), id).await?;
    Ok(Json(ApiResponse::success(Some(diary), None, None)))
}

/// Partially update an own diary entry
#[utoipa::path(
    patch,
    path = "/api/diaries/{id}",
    params(
        ("id" = Uuid, Path, description = "Diary ID")
    ),
    request_body = UpdateDiaryDto,
    responses(
        (status = 200, description = "Entry updated", body = ApiResponse<DiaryResponseDto>),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Entry not found"),
        (status = 409, description = "Entry was relocated concurrently")
    ),
    security(("bearer_auth" = [])),
    tag = "diaries"
)]
pub async fn update_diary(
    user: AuthenticatedUser,
    State(service): State<Arc<DiaryService>>,
    AppPath(id): AppPath<Uuid>,
    AppJson(dto): AppJson<UpdateDiaryDto>,
) -> Result<Json<ApiResponse<DiaryResponseDto>>> {
    let diary = service.update(user.user_id(), id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(diary),
        Some("Diary updated successfully".to_string()),
        None,
    )))
}

/// Delete an own diary entry
#[utoipa::path(
    delete,
    path = "/api/diaries/{id}",
    params(
        ("id" = Uuid, Path, description = "Diary ID")
    ),
    responses(
        (status = 200, description = "Entry deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Entry not found")
    ),
    security(("bearer_auth" = [])),
    tag = "diaries"
)]
pub async fn delete_diary(
    user: AuthenticatedUser,
    State(service): State<Arc<DiaryService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(user.user_id(), id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Diary deleted successfully".to_string()),
        None,
    )))
}
