use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use uuid::Uuid;

use schoolhub_auth::{Claims, Role, verify_token};
use schoolhub_core::AppError;

use crate::state::AppState;

/// The verified caller of a request.
///
/// Role gates attach it to the request extensions; outside a gate the token
/// is read and verified on extraction.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        self.0.user_id()
    }

    /// Tenant every query of this caller is scoped to.
    pub fn school_id(&self) -> Uuid {
        self.0.school_id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.0.has_role(roles)
    }
}

/// Token from the `Authorization` header, with or without the `Bearer ` prefix.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let token = match value.strip_prefix("Bearer") {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
        _ => value,
    };
    (!token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::unauthorized("No Token, Authorization denied"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}
