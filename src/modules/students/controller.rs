use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use schoolhub_core::{ApiResponse, AppError};

use crate::forms::FormData;
use crate::middleware::auth::AuthUser;
use crate::modules::students::model::{
    RegisterStudentForm, Student, StudentFilterParams, UpdateStudentDto,
};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, parse_id, validate_dto};

fn register_form(form: &FormData) -> Result<RegisterStudentForm, AppError> {
    Ok(RegisterStudentForm {
        name: form.require("name")?,
        email: form.require("email")?,
        guardian: form.require("guardian")?,
        password: form.require("password")?,
        student_class: form.text("student_class"),
        age: form.parse("age")?,
        gender: form.text("gender"),
        guardian_phone: form.text("guardian_phone"),
    })
}

#[utoipa::path(
    post,
    path = "/api/student/register",
    request_body(content = RegisterStudentForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Student registered", body = Student),
        (status = 400, description = "Missing field or student image"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can register students"),
        (status = 409, description = "Email is already registered")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, form))]
pub async fn register_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    mut form: FormData,
) -> Result<(StatusCode, ApiResponse<Student>), AppError> {
    let dto = register_form(&form)?;
    validate_dto(&dto)?;
    let image = form.take_file("student_image");

    let student = StudentService::register_student(
        &state.db,
        state.assets.as_ref(),
        auth_user.school_id(),
        dto,
        image,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_data("Student registered successfully", student),
    ))
}

#[utoipa::path(
    get,
    path = "/api/student/all",
    params(StudentFilterParams),
    responses(
        (status = 200, description = "Students of the caller's school", body = Vec<Student>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can list students")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(filters): Query<StudentFilterParams>,
) -> Result<ApiResponse<Vec<Student>>, AppError> {
    let students = StudentService::get_students(&state.db, auth_user.school_id(), filters).await?;

    Ok(ApiResponse::with_data("Successfully fetched all students", students))
}

#[utoipa::path(
    get,
    path = "/api/student/fetch-single",
    responses(
        (status = 200, description = "The calling student", body = Student),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only students can fetch their record"),
        (status = 404, description = "Student not found")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_own_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<ApiResponse<Student>, AppError> {
    let student =
        StudentService::get_student_by_id(&state.db, auth_user.user_id()?, auth_user.school_id())
            .await?;

    Ok(ApiResponse::with_data("Successfully fetched the student", student))
}

#[utoipa::path(
    get,
    path = "/api/student/fetch/{id}",
    params(
        ("id" = String, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can fetch students"),
        (status = 404, description = "Student not found")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<Student>, AppError> {
    let student_id = parse_id(&id, "student")?;
    let student =
        StudentService::get_student_by_id(&state.db, student_id, auth_user.school_id()).await?;

    Ok(ApiResponse::with_data("Successfully fetched the student", student))
}

#[utoipa::path(
    patch,
    path = "/api/student/update/{id}",
    params(
        ("id" = String, Path, description = "Student ID")
    ),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can update students"),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Email is already registered")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<ApiResponse<Student>, AppError> {
    let student_id = parse_id(&id, "student")?;
    let student =
        StudentService::update_student(&state.db, student_id, auth_user.school_id(), dto).await?;

    Ok(ApiResponse::with_data("Student updated successfully", student))
}

#[utoipa::path(
    delete,
    path = "/api/student/delete/{id}",
    params(
        ("id" = String, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can delete students"),
        (status = 404, description = "Student not found")
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, AppError> {
    let student_id = parse_id(&id, "student")?;
    StudentService::delete_student(
        &state.db,
        state.assets.as_ref(),
        student_id,
        auth_user.school_id(),
    )
    .await?;

    Ok(ApiResponse::message("Student deleted successfully"))
}
