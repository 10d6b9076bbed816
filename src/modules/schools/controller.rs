use axum::{extract::State, http::StatusCode};
use tracing::instrument;

use schoolhub_core::{ApiResponse, AppError};

use crate::forms::FormData;
use crate::middleware::auth::AuthUser;
use crate::modules::schools::model::{PublicSchool, RegisterSchoolForm, School, UpdateSchoolForm};
use crate::modules::schools::service::SchoolService;
use crate::state::AppState;
use crate::validator::validate_dto;

fn register_form(form: &FormData) -> Result<RegisterSchoolForm, AppError> {
    Ok(RegisterSchoolForm {
        school_name: form.require("school_name")?,
        email: form.require("email")?,
        owner_name: form.require("owner_name")?,
        password: form.require("password")?,
    })
}

fn update_form(form: &FormData) -> UpdateSchoolForm {
    UpdateSchoolForm {
        school_name: form.text("school_name"),
        owner_name: form.text("owner_name"),
        email: form.text("email"),
        password: form.text("password"),
    }
}

#[utoipa::path(
    post,
    path = "/api/school/register",
    request_body(content = RegisterSchoolForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "School registered", body = School),
        (status = 400, description = "Missing field or invalid image"),
        (status = 409, description = "Email is already registered")
    ),
    tag = "Schools"
)]
#[instrument(skip(state, form))]
pub async fn register_school(
    State(state): State<AppState>,
    mut form: FormData,
) -> Result<(StatusCode, ApiResponse<School>), AppError> {
    let dto = register_form(&form)?;
    validate_dto(&dto)?;
    let image = form.take_file("image");

    let school = SchoolService::register_school(&state.db, state.assets.as_ref(), dto, image).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_data("School registered successfully", school),
    ))
}

#[utoipa::path(
    get,
    path = "/api/school/all",
    responses(
        (status = 200, description = "Name and image of every school", body = Vec<PublicSchool>)
    ),
    tag = "Schools"
)]
#[instrument(skip(state))]
pub async fn get_all_schools(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<PublicSchool>>, AppError> {
    let schools = SchoolService::get_public_schools(&state.db).await?;

    Ok(ApiResponse::with_data("Successfully fetched all schools", schools))
}

#[utoipa::path(
    get,
    path = "/api/school/fetch-single",
    responses(
        (status = 200, description = "The caller's school", body = School),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can fetch their record"),
        (status = 404, description = "School not found")
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_own_school(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<ApiResponse<School>, AppError> {
    let school = SchoolService::get_school_by_id(&state.db, auth_user.school_id()).await?;

    Ok(ApiResponse::with_data("Successfully fetched the school", school))
}

#[utoipa::path(
    patch,
    path = "/api/school/update",
    request_body(content = UpdateSchoolForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "School updated", body = School),
        (status = 400, description = "Invalid input or image"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can update their record"),
        (status = 409, description = "Email is already registered")
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, form))]
pub async fn update_school(
    State(state): State<AppState>,
    auth_user: AuthUser,
    mut form: FormData,
) -> Result<ApiResponse<School>, AppError> {
    let dto = update_form(&form);
    validate_dto(&dto)?;
    let image = form.take_file("image");

    let school = SchoolService::update_school(
        &state.db,
        state.assets.as_ref(),
        auth_user.school_id(),
        dto,
        image,
    )
    .await?;

    Ok(ApiResponse::with_data("School updated successfully", school))
}
