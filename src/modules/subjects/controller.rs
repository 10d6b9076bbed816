use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use schoolhub_core::{ApiResponse, AppError};

use crate::middleware::auth::AuthUser;
use crate::modules::subjects::model::{CreateSubjectDto, Subject, UpdateSubjectDto};
use crate::modules::subjects::service::SubjectService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, parse_id};

#[utoipa::path(
    post,
    path = "/api/subject/create",
    request_body = CreateSubjectDto,
    responses(
        (status = 201, description = "Subject created", body = Subject),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can create subjects")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_subject(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateSubjectDto>,
) -> Result<(StatusCode, ApiResponse<Subject>), AppError> {
    let subject = SubjectService::create_subject(&state.db, auth_user.school_id(), dto).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_data("Successfully created the subject", subject),
    ))
}

#[utoipa::path(
    get,
    path = "/api/subject/all",
    responses(
        (status = 200, description = "Subjects of the caller's school", body = Vec<Subject>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Students cannot list subjects")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_subjects(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<ApiResponse<Vec<Subject>>, AppError> {
    let subjects = SubjectService::get_subjects(&state.db, auth_user.school_id()).await?;

    Ok(ApiResponse::with_data("Successfully fetched all subjects", subjects))
}

#[utoipa::path(
    patch,
    path = "/api/subject/update/{id}",
    params(
        ("id" = String, Path, description = "Subject ID")
    ),
    request_body = UpdateSubjectDto,
    responses(
        (status = 200, description = "Subject updated", body = Subject),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can update subjects"),
        (status = 404, description = "Subject not found")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_subject(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateSubjectDto>,
) -> Result<ApiResponse<Subject>, AppError> {
    let subject_id = parse_id(&id, "subject")?;
    let subject =
        SubjectService::update_subject(&state.db, subject_id, auth_user.school_id(), dto).await?;

    Ok(ApiResponse::with_data("Successfully updated the subject", subject))
}

#[utoipa::path(
    delete,
    path = "/api/subject/delete/{id}",
    params(
        ("id" = String, Path, description = "Subject ID")
    ),
    responses(
        (status = 200, description = "Subject deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can delete subjects"),
        (status = 404, description = "Subject not found"),
        (status = 409, description = "Subject is still scheduled")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_subject(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, AppError> {
    let subject_id = parse_id(&id, "subject")?;
    SubjectService::delete_subject(&state.db, subject_id, auth_user.school_id()).await?;

    Ok(ApiResponse::message("Successfully deleted the subject"))
}
