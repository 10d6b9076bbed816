use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::middleware::role::{require_school, require_school_or_teacher, require_student};
use crate::state::AppState;

use super::controller::{
    create_schedule, delete_schedule, get_schedules, get_student_schedules, update_schedule,
};

pub fn init_schedules_router(state: &AppState) -> Router<AppState> {
    let school_routes = Router::new()
        .route("/create", post(create_schedule))
        .route("/delete/{id}", delete(delete_schedule))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_school));

    let staff_routes = Router::new()
        .route("/all", get(get_schedules))
        .route("/update/{id}", patch(update_schedule))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school_or_teacher,
        ));

    let student_routes = Router::new()
        .route("/fetch", get(get_student_schedules))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_student));

    Router::new()
        .merge(school_routes)
        .merge(staff_routes)
        .merge(student_routes)
}
