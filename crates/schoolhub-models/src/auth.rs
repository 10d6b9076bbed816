//! Login shapes shared by the three account kinds.

use schoolhub_auth::Role;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub use schoolhub_auth::Claims;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Email is invalid"), length(max = 255, message = "Email is too long"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "password123")]
    pub password: String,
}

/// Stored credentials of any account kind, selected with column aliases.
#[derive(Debug, Clone, FromRow)]
pub struct Credentials {
    pub id: Uuid,
    pub school_id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginUser {
    pub id: Uuid,
    pub school_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub image_url: Option<String>,
}

impl LoginUser {
    pub fn from_credentials(credentials: Credentials, role: Role) -> Self {
        Self {
            id: credentials.id,
            school_id: credentials.school_id,
            name: credentials.name,
            email: credentials.email,
            role,
            image_url: credentials.image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}
