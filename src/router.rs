use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Router, middleware};
use schoolhub_observability::{logging_middleware, metrics_middleware, render_metrics};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::modules::classes::init_classes_router;
use crate::modules::notices::init_notices_router;
use crate::modules::schedules::init_schedules_router;
use crate::modules::schools::init_schools_router;
use crate::modules::students::init_students_router;
use crate::modules::subjects::init_subjects_router;
use crate::modules::teachers::init_teachers_router;
use crate::state::AppState;

/// Room for multipart boundaries and text fields on top of the image limit.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics_handle {
        Some(handle) => (StatusCode::OK, render_metrics(handle)),
        None => (StatusCode::NOT_FOUND, "Metrics are disabled".to_string()),
    }
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let origin = if state.cors_config.allows_any() {
        AllowOrigin::mirror_request()
    } else {
        let allowed_origins: Vec<HeaderValue> = state
            .cors_config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        AllowOrigin::list(allowed_origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::AUTHORIZATION])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/school", init_schools_router(&state))
                .nest("/manageteacher", init_teachers_router(&state))
                .nest("/student", init_students_router(&state))
                .nest("/class", init_classes_router(&state))
                .nest("/subject", init_subjects_router(&state))
                .nest("/schedule", init_schedules_router(&state))
                .nest("/notice", init_notices_router(&state)),
        )
        .nest_service("/files", ServeDir::new(&state.storage_config.asset_dir))
        .route("/metrics", get(metrics_handler))
        .layer(DefaultBodyLimit::max(
            state.storage_config.max_bytes + FORM_OVERHEAD_BYTES,
        ))
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
