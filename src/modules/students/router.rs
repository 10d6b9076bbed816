use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::middleware::role::{require_school, require_student};
use crate::modules::auth::controller::login_student;
use crate::state::AppState;

use super::controller::{
    delete_student, get_own_student, get_student, get_students, register_student, update_student,
};

pub fn init_students_router(state: &AppState) -> Router<AppState> {
    let school_routes = Router::new()
        .route("/register", post(register_student))
        .route("/all", get(get_students))
        .route("/fetch/{id}", get(get_student))
        .route("/update/{id}", patch(update_student))
        .route("/delete/{id}", delete(delete_student))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_school));

    let student_routes = Router::new()
        .route("/fetch-single", get(get_own_student))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_student));

    Router::new()
        .route("/login", post(login_student))
        .merge(school_routes)
        .merge(student_routes)
}
