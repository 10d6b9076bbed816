//! Role gates for Axum routers.
//!
//! Each gate authenticates the bearer token, attaches the [`AuthUser`] to
//! the request and then checks the caller's role. No database access.
//!
//! ```rust,ignore
//! let routes = Router::new()
//!     .route("/create", post(create_class))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_school));
//! ```

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use schoolhub_auth::Role;
use schoolhub_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// An empty `allowed` list admits any authenticated caller.
pub fn check_any_role(auth_user: &AuthUser, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.is_empty() || auth_user.has_any_role(allowed) {
        Ok(())
    } else {
        Err(AppError::forbidden("Access Denied"))
    }
}

pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: Vec<Role>,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    parts.extensions.insert(auth_user.clone());

    check_any_role(&auth_user, &allowed_roles)?;

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

pub async fn require_school(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![Role::School]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub async fn require_school_or_teacher(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    match require_roles(State(state), req, next, vec![Role::School, Role::Teacher]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub async fn require_teacher(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![Role::Teacher]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![Role::Student]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Any signed-in school, teacher or student.
pub async fn require_member(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(
        State(state),
        req,
        next,
        vec![Role::School, Role::Teacher, Role::Student],
    )
    .await
    {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
