//! Class domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Class {
    pub id: Uuid,
    pub school_id: Uuid,
    pub class_text: String,
    pub class_num: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Embedded in populated schedules.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClassSummary {
    pub id: Uuid,
    pub class_text: String,
    pub class_num: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateClassDto {
    #[validate(length(min = 1, max = 255, message = "Class text is required"))]
    #[schema(example = "Grade 10")]
    pub class_text: String,
    #[validate(range(min = 0, message = "Class number must not be negative"))]
    #[schema(example = 10)]
    pub class_num: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateClassDto {
    #[validate(length(min = 1, max = 255, message = "Class text must not be empty"))]
    pub class_text: Option<String>,
    #[validate(range(min = 0, message = "Class number must not be negative"))]
    pub class_num: Option<i32>,
}
