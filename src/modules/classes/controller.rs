use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use schoolhub_core::{ApiResponse, AppError};

use crate::middleware::auth::AuthUser;
use crate::modules::classes::model::{Class, CreateClassDto, UpdateClassDto};
use crate::modules::classes::service::ClassService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, parse_id};

#[utoipa::path(
    post,
    path = "/api/class/create",
    request_body = CreateClassDto,
    responses(
        (status = 201, description = "Class created", body = Class),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can create classes")
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateClassDto>,
) -> Result<(StatusCode, ApiResponse<Class>), AppError> {
    let class = ClassService::create_class(&state.db, auth_user.school_id(), dto).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_data("Successfully created the class", class),
    ))
}

#[utoipa::path(
    get,
    path = "/api/class/all",
    responses(
        (status = 200, description = "Classes of the caller's school", body = Vec<Class>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Students cannot list classes")
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_classes(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<ApiResponse<Vec<Class>>, AppError> {
    let classes = ClassService::get_classes(&state.db, auth_user.school_id()).await?;

    Ok(ApiResponse::with_data("Successfully fetched all classes", classes))
}

#[utoipa::path(
    patch,
    path = "/api/class/update/{id}",
    params(
        ("id" = String, Path, description = "Class ID")
    ),
    request_body = UpdateClassDto,
    responses(
        (status = 200, description = "Class updated", body = Class),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can update classes"),
        (status = 404, description = "Class not found")
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateClassDto>,
) -> Result<ApiResponse<Class>, AppError> {
    let class_id = parse_id(&id, "class")?;
    let class = ClassService::update_class(&state.db, class_id, auth_user.school_id(), dto).await?;

    Ok(ApiResponse::with_data("Successfully updated the class", class))
}

#[utoipa::path(
    delete,
    path = "/api/class/delete/{id}",
    params(
        ("id" = String, Path, description = "Class ID")
    ),
    responses(
        (status = 200, description = "Class deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can delete classes"),
        (status = 404, description = "Class not found"),
        (status = 409, description = "Class still has students or schedules")
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, AppError> {
    let class_id = parse_id(&id, "class")?;
    ClassService::delete_class(&state.db, class_id, auth_user.school_id()).await?;

    Ok(ApiResponse::message("Successfully deleted the class"))
}
