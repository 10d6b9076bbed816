//! Teacher domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Teacher {
    pub id: Uuid,
    pub school_id: Uuid,
    pub email: String,
    pub name: String,
    pub qualification: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub teacher_image: Option<String>,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub teacher_image_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate, ToSchema)]
pub struct RegisterTeacherForm {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Email is invalid"), length(max = 255, message = "Email is too long"))]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "Qualification is required"))]
    pub qualification: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(range(min = 0, max = 150, message = "Age is out of range"))]
    pub age: Option<i32>,
    #[validate(length(max = 32, message = "Gender is too long"))]
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdateTeacherForm {
    #[validate(length(min = 1, max = 255, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Email is invalid"), length(max = 255, message = "Email is too long"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Qualification must not be empty"))]
    pub qualification: Option<String>,
    #[validate(range(min = 0, max = 150, message = "Age is out of range"))]
    pub age: Option<i32>,
    #[validate(length(max = 32, message = "Gender is too long"))]
    pub gender: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct TeacherFilterParams {
    /// Case-insensitive match on name
    #[serde(default, deserialize_with = "schoolhub_core::serde::deserialize_optional_trimmed")]
    pub search: Option<String>,
}
