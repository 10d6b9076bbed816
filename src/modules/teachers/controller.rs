use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use schoolhub_core::{ApiResponse, AppError};

use crate::forms::FormData;
use crate::middleware::auth::AuthUser;
use crate::modules::teachers::model::{
    RegisterTeacherForm, Teacher, TeacherFilterParams, UpdateTeacherForm,
};
use crate::modules::teachers::service::TeacherService;
use crate::state::AppState;
use crate::validator::{parse_id, validate_dto};

fn register_form(form: &FormData) -> Result<RegisterTeacherForm, AppError> {
    Ok(RegisterTeacherForm {
        name: form.require("name")?,
        email: form.require("email")?,
        qualification: form.require("qualification")?,
        password: form.require("password")?,
        age: form.parse("age")?,
        gender: form.text("gender"),
    })
}

fn update_form(form: &FormData) -> Result<UpdateTeacherForm, AppError> {
    Ok(UpdateTeacherForm {
        name: form.text("name"),
        email: form.text("email"),
        qualification: form.text("qualification"),
        age: form.parse("age")?,
        gender: form.text("gender"),
        password: form.text("password"),
    })
}

#[utoipa::path(
    post,
    path = "/api/manageteacher/register",
    request_body(content = RegisterTeacherForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Teacher registered", body = Teacher),
        (status = 400, description = "Missing field or invalid image"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can register teachers"),
        (status = 409, description = "Email is already registered")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, form))]
pub async fn register_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    mut form: FormData,
) -> Result<(StatusCode, ApiResponse<Teacher>), AppError> {
    let dto = register_form(&form)?;
    validate_dto(&dto)?;
    let image = form.take_file("teacher_image");

    let teacher = TeacherService::register_teacher(
        &state.db,
        state.assets.as_ref(),
        auth_user.school_id(),
        dto,
        image,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_data("Teacher registered successfully", teacher),
    ))
}

#[utoipa::path(
    get,
    path = "/api/manageteacher/all",
    params(TeacherFilterParams),
    responses(
        (status = 200, description = "Teachers of the caller's school", body = Vec<Teacher>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can list teachers")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_teachers(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(filters): Query<TeacherFilterParams>,
) -> Result<ApiResponse<Vec<Teacher>>, AppError> {
    let teachers = TeacherService::get_teachers(&state.db, auth_user.school_id(), filters).await?;

    Ok(ApiResponse::with_data("Successfully fetched all teachers", teachers))
}

#[utoipa::path(
    get,
    path = "/api/manageteacher/fetch-single",
    responses(
        (status = 200, description = "The calling teacher", body = Teacher),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only teachers can fetch their record"),
        (status = 404, description = "Teacher not found")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_own_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<ApiResponse<Teacher>, AppError> {
    let teacher =
        TeacherService::get_teacher_by_id(&state.db, auth_user.user_id()?, auth_user.school_id())
            .await?;

    Ok(ApiResponse::with_data("Successfully fetched the teacher", teacher))
}

#[utoipa::path(
    get,
    path = "/api/manageteacher/fetch/{id}",
    params(
        ("id" = String, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Teacher details", body = Teacher),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can fetch teachers"),
        (status = 404, description = "Teacher not found")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<Teacher>, AppError> {
    let teacher_id = parse_id(&id, "teacher")?;
    let teacher =
        TeacherService::get_teacher_by_id(&state.db, teacher_id, auth_user.school_id()).await?;

    Ok(ApiResponse::with_data("Successfully fetched the teacher", teacher))
}

#[utoipa::path(
    patch,
    path = "/api/manageteacher/update/{id}",
    params(
        ("id" = String, Path, description = "Teacher ID")
    ),
    request_body(content = UpdateTeacherForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Teacher updated", body = Teacher),
        (status = 400, description = "Invalid input or image"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can update teachers"),
        (status = 404, description = "Teacher not found"),
        (status = 409, description = "Email is already registered")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, form))]
pub async fn update_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    mut form: FormData,
) -> Result<ApiResponse<Teacher>, AppError> {
    let teacher_id = parse_id(&id, "teacher")?;
    let dto = update_form(&form)?;
    validate_dto(&dto)?;
    let image = form.take_file("teacher_image");

    let teacher = TeacherService::update_teacher(
        &state.db,
        state.assets.as_ref(),
        teacher_id,
        auth_user.school_id(),
        dto,
        image,
    )
    .await?;

    Ok(ApiResponse::with_data("Teacher updated successfully", teacher))
}

#[utoipa::path(
    delete,
    path = "/api/manageteacher/delete/{id}",
    params(
        ("id" = String, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Teacher deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can delete teachers"),
        (status = 404, description = "Teacher not found")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, AppError> {
    let teacher_id = parse_id(&id, "teacher")?;
    TeacherService::delete_teacher(
        &state.db,
        state.assets.as_ref(),
        teacher_id,
        auth_user.school_id(),
    )
    .await?;

    Ok(ApiResponse::message("Teacher deleted successfully"))
}
