//! Student domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub school_id: Uuid,
    pub email: String,
    pub name: String,
    /// Class label; matches a class id, number or text within the school
    pub student_class: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub guardian: String,
    pub guardian_phone: Option<String>,
    pub student_image: String,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub student_image_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate, ToSchema)]
pub struct RegisterStudentForm {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Email is invalid"), length(max = 255, message = "Email is too long"))]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "Guardian is required"))]
    pub guardian: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(max = 255, message = "Student class is too long"))]
    pub student_class: Option<String>,
    #[validate(range(min = 0, max = 150, message = "Age is out of range"))]
    pub age: Option<i32>,
    #[validate(length(max = 32, message = "Gender is too long"))]
    pub gender: Option<String>,
    #[validate(length(max = 64, message = "Guardian phone is too long"))]
    pub guardian_phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 255, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Email is invalid"), length(max = 255, message = "Email is too long"))]
    pub email: Option<String>,
    #[validate(length(max = 255, message = "Student class is too long"))]
    pub student_class: Option<String>,
    #[validate(range(min = 0, max = 150, message = "Age is out of range"))]
    pub age: Option<i32>,
    #[validate(length(max = 32, message = "Gender is too long"))]
    pub gender: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Guardian must not be empty"))]
    pub guardian: Option<String>,
    #[validate(length(max = 64, message = "Guardian phone is too long"))]
    pub guardian_phone: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct StudentFilterParams {
    /// Case-insensitive match on name
    #[serde(default, deserialize_with = "schoolhub_core::serde::deserialize_optional_trimmed")]
    pub search: Option<String>,
    /// Exact class label
    #[serde(default, deserialize_with = "schoolhub_core::serde::deserialize_optional_trimmed")]
    pub student_class: Option<String>,
}
