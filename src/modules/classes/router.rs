use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::middleware::role::{require_school, require_school_or_teacher};
use crate::state::AppState;

use super::controller::{create_class, delete_class, get_classes, update_class};

pub fn init_classes_router(state: &AppState) -> Router<AppState> {
    let school_routes = Router::new()
        .route("/create", post(create_class))
        .route("/update/{id}", patch(update_class))
        .route("/delete/{id}", delete(delete_class))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_school));

    let staff_routes = Router::new()
        .route("/all", get(get_classes))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_school_or_teacher,
        ));

    school_routes.merge(staff_routes)
}
