use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::middleware::role::{require_school, require_school_or_teacher};
use crate::state::AppState;

use super::controller::{create_subject, delete_subject, get_subjects, update_subject};

pub fn init_subjects_router(state: &AppState) -> Router<AppState> {
    let school_routes = Router::new()
        .route("/create", post(create_subject))
        .route("/update/{id}", patch(update_subject))
        .route("/delete/{id}", delete(delete_subject))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_school));

    let staff_routes = Router::new()
        .route("/all", get(get_subjects))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school_or_teacher,
        ));

    school_routes.merge(staff_routes)
}
