use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use schoolhub_core::{ApiResponse, AppError};

use crate::middleware::auth::AuthUser;
use crate::modules::notices::model::{CreateNoticeDto, Notice, UpdateNoticeDto, visible_audiences};
use crate::modules::notices::service::NoticeService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, parse_id};

#[utoipa::path(
    post,
    path = "/api/notice/create",
    request_body = CreateNoticeDto,
    responses(
        (status = 201, description = "Notice created", body = Notice),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can publish notices")
    ),
    tag = "Notices",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_notice(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateNoticeDto>,
) -> Result<(StatusCode, ApiResponse<Notice>), AppError> {
    let notice = NoticeService::create_notice(&state.db, auth_user.school_id(), dto).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_data("Notice created successfully", notice),
    ))
}

/// Notices visible to the caller's role.
#[utoipa::path(
    get,
    path = "/api/notice/all",
    responses(
        (status = 200, description = "Notices visible to the caller", body = Vec<Notice>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Notices",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_notices(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<ApiResponse<Vec<Notice>>, AppError> {
    let audiences = visible_audiences(Some(auth_user.role()));
    let notices = NoticeService::get_notices(&state.db, auth_user.school_id(), &audiences).await?;

    Ok(ApiResponse::with_data("Successfully fetched all notices", notices))
}

#[utoipa::path(
    get,
    path = "/api/notice/website/{school_id}",
    params(
        ("school_id" = String, Path, description = "School ID")
    ),
    responses(
        (status = 200, description = "Public notices of a school", body = Vec<Notice>),
        (status = 400, description = "Invalid school ID")
    ),
    tag = "Notices"
)]
#[instrument(skip(state))]
pub async fn get_website_notices(
    State(state): State<AppState>,
    Path(school_id): Path<String>,
) -> Result<ApiResponse<Vec<Notice>>, AppError> {
    let school_id = parse_id(&school_id, "school")?;
    let notices =
        NoticeService::get_notices(&state.db, school_id, &visible_audiences(None)).await?;

    Ok(ApiResponse::with_data("Successfully fetched all notices", notices))
}

#[utoipa::path(
    patch,
    path = "/api/notice/update/{id}",
    params(
        ("id" = String, Path, description = "Notice ID")
    ),
    request_body = UpdateNoticeDto,
    responses(
        (status = 200, description = "Notice updated", body = Notice),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can update notices"),
        (status = 404, description = "Notice not found")
    ),
    tag = "Notices",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_notice(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateNoticeDto>,
) -> Result<ApiResponse<Notice>, AppError> {
    let notice_id = parse_id(&id, "notice")?;
    let notice =
        NoticeService::update_notice(&state.db, notice_id, auth_user.school_id(), dto).await?;

    Ok(ApiResponse::with_data("Notice updated successfully", notice))
}

#[utoipa::path(
    delete,
    path = "/api/notice/delete/{id}",
    params(
        ("id" = String, Path, description = "Notice ID")
    ),
    responses(
        (status = 200, description = "Notice deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can delete notices"),
        (status = 404, description = "Notice not found")
    ),
    tag = "Notices",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_notice(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, AppError> {
    let notice_id = parse_id(&id, "notice")?;
    NoticeService::delete_notice(&state.db, notice_id, auth_user.school_id()).await?;

    Ok(ApiResponse::message("Notice deleted successfully"))
}
