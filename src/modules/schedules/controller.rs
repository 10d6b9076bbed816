use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use schoolhub_auth::Role;
use schoolhub_core::{ApiResponse, AppError};

use crate::middleware::auth::AuthUser;
use crate::modules::schedules::model::{
    CreateScheduleDto, Schedule, ScheduleWithDetails, UpdateScheduleDto,
};
use crate::modules::schedules::service::ScheduleService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, parse_id};

#[utoipa::path(
    post,
    path = "/api/schedule/create",
    request_body = CreateScheduleDto,
    responses(
        (status = 201, description = "Schedule created", body = Schedule),
        (status = 400, description = "Invalid input or reference ID"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can create schedules"),
        (status = 404, description = "Teacher, subject or class not found")
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_schedule(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateScheduleDto>,
) -> Result<(StatusCode, ApiResponse<Schedule>), AppError> {
    let schedule = ScheduleService::create_schedule(&state.db, auth_user.school_id(), dto).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_data("Schedule created successfully", schedule),
    ))
}

#[utoipa::path(
    get,
    path = "/api/schedule/all",
    responses(
        (status = 200, description = "Schedules with teacher, subject and class", body = Vec<ScheduleWithDetails>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Students cannot list all schedules")
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_schedules(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<ApiResponse<Vec<ScheduleWithDetails>>, AppError> {
    let schedules = ScheduleService::get_schedules(&state.db, auth_user.school_id()).await?;

    Ok(ApiResponse::with_data("Successfully fetched all schedules", schedules))
}

#[utoipa::path(
    get,
    path = "/api/schedule/fetch",
    responses(
        (status = 200, description = "Timetable of the calling student's class", body = Vec<ScheduleWithDetails>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only students have a class timetable")
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student_schedules(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<ApiResponse<Vec<ScheduleWithDetails>>, AppError> {
    let schedules = ScheduleService::get_student_schedules(
        &state.db,
        auth_user.user_id()?,
        auth_user.school_id(),
    )
    .await?;

    Ok(ApiResponse::with_data("Successfully fetched schedules", schedules))
}

#[utoipa::path(
    patch,
    path = "/api/schedule/update/{id}",
    params(
        ("id" = String, Path, description = "Schedule ID")
    ),
    request_body = UpdateScheduleDto,
    responses(
        (status = 200, description = "Schedule updated", body = Schedule),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Teacher is not assigned to this schedule"),
        (status = 404, description = "Schedule or reference not found")
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_schedule(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateScheduleDto>,
) -> Result<ApiResponse<Schedule>, AppError> {
    let schedule_id = parse_id(&id, "schedule")?;
    let assigned_teacher = match auth_user.role() {
        Role::Teacher => Some(auth_user.user_id()?),
        _ => None,
    };

    let schedule = ScheduleService::update_schedule(
        &state.db,
        schedule_id,
        auth_user.school_id(),
        assigned_teacher,
        dto,
    )
    .await?;

    Ok(ApiResponse::with_data("Schedule updated successfully", schedule))
}

#[utoipa::path(
    delete,
    path = "/api/schedule/delete/{id}",
    params(
        ("id" = String, Path, description = "Schedule ID")
    ),
    responses(
        (status = 200, description = "Schedule deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only schools can delete schedules"),
        (status = 404, description = "Schedule not found")
    ),
    tag = "Schedules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_schedule(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, AppError> {
    let schedule_id = parse_id(&id, "schedule")?;
    ScheduleService::delete_schedule(&state.db, schedule_id, auth_user.school_id()).await?;

    Ok(ApiResponse::message("Schedule deleted successfully"))
}
