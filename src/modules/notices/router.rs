use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::middleware::role::{require_member, require_school};
use crate::state::AppState;

use super::controller::{
    create_notice, delete_notice, get_notices, get_website_notices, update_notice,
};

pub fn init_notices_router(state: &AppState) -> Router<AppState> {
    let school_routes = Router::new()
        .route("/create", post(create_notice))
        .route("/update/{id}", patch(update_notice))
        .route("/delete/{id}", delete(delete_notice))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_school));

    let member_routes = Router::new()
        .route("/all", get(get_notices))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_member));

    Router::new()
        .route("/website/{school_id}", get(get_website_notices))
        .merge(school_routes)
        .merge(member_routes)
}
