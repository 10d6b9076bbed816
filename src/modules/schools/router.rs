use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::middleware::role::require_school;
use crate::modules::auth::controller::login_school;
use crate::state::AppState;

use super::controller::{get_all_schools, get_own_school, register_school, update_school};

pub fn init_schools_router(state: &AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/register", post(register_school))
        .route("/login", post(login_school))
        .route("/all", get(get_all_schools));

    let school_routes = Router::new()
        .route("/update", patch(update_school))
        .route("/fetch-single", get(get_own_school))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_school));

    public_routes.merge(school_routes)
}
