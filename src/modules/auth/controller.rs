//! Login endpoints of the three account kinds.
//!
//! Each is mounted under its own resource (`/school/login`,
//! `/manageteacher/login`, `/student/login`). The token is returned in the
//! body and in the `Authorization` response header.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use schoolhub_auth::Role;
use schoolhub_core::{ApiResponse, AppError};

use super::service::AuthService;
use super::{LoginRequest, LoginResponse};
use crate::state::AppState;
use crate::validator::ValidatedJson;

fn login_response(response: LoginResponse) -> Response {
    (
        [(header::AUTHORIZATION, format!("Bearer {}", response.token))],
        ApiResponse::with_data("Login successful", response),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/api/school/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; token also set in the Authorization header", body = LoginResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unknown email or wrong password")
    ),
    tag = "Schools"
)]
#[instrument(skip(state, dto))]
pub async fn login_school(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Response, AppError> {
    let response = AuthService::login(&state.db, &state.jwt_config, Role::School, dto).await?;
    Ok(login_response(response))
}

#[utoipa::path(
    post,
    path = "/api/manageteacher/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; token also set in the Authorization header", body = LoginResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unknown email or wrong password")
    ),
    tag = "Teachers"
)]
#[instrument(skip(state, dto))]
pub async fn login_teacher(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Response, AppError> {
    let response = AuthService::login(&state.db, &state.jwt_config, Role::Teacher, dto).await?;
    Ok(login_response(response))
}

#[utoipa::path(
    post,
    path = "/api/student/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; token also set in the Authorization header", body = LoginResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unknown email or wrong password")
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn login_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Response, AppError> {
    let response = AuthService::login(&state.db, &state.jwt_config, Role::Student, dto).await?;
    Ok(login_response(response))
}
