//! School domain models and DTOs.
//!
//! A school is both an account and the tenant every other record belongs to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct School {
    pub id: Uuid,
    pub school_name: String,
    pub owner_name: String,
    pub email: String,
    pub school_image: Option<String>,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub school_image_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public listing entry. Contact details stay private.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct PublicSchool {
    pub school_name: String,
    pub school_image: Option<String>,
}

/// Text fields of the multipart registration form. The `image` part is
/// handled separately.
#[derive(Debug, Clone, Validate, ToSchema)]
pub struct RegisterSchoolForm {
    #[validate(length(min = 1, max = 255, message = "School name is required"))]
    pub school_name: String,
    #[validate(email(message = "Email is invalid"), length(max = 255, message = "Email is too long"))]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "Owner name is required"))]
    pub owner_name: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdateSchoolForm {
    #[validate(length(min = 1, max = 255, message = "School name must not be empty"))]
    pub school_name: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Owner name must not be empty"))]
    pub owner_name: Option<String>,
    #[validate(email(message = "Email is invalid"), length(max = 255, message = "Email is too long"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}
