use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::middleware::role::{require_school, require_teacher};
use crate::modules::auth::controller::login_teacher;
use crate::state::AppState;

use super::controller::{
    delete_teacher, get_own_teacher, get_teacher, get_teachers, register_teacher, update_teacher,
};

/// Mounted at `/manageteacher`.
pub fn init_teachers_router(state: &AppState) -> Router<AppState> {
    let school_routes = Router::new()
        .route("/register", post(register_teacher))
        .route("/all", get(get_teachers))
        .route("/fetch/{id}", get(get_teacher))
        .route("/update/{id}", patch(update_teacher))
        .route("/delete/{id}", delete(delete_teacher))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_school));

    let teacher_routes = Router::new()
        .route("/fetch-single", get(get_own_teacher))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_teacher));

    Router::new()
        .route("/login", post(login_teacher))
        .merge(school_routes)
        .merge(teacher_routes)
}
