//! Subject domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Subject {
    pub id: Uuid,
    pub school_id: Uuid,
    pub subject_name: String,
    pub subject_codename: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubjectSummary {
    pub id: Uuid,
    pub subject_name: String,
    pub subject_codename: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSubjectDto {
    #[validate(length(min = 1, max = 255, message = "Subject name is required"))]
    #[schema(example = "Mathematics")]
    pub subject_name: String,
    #[validate(length(min = 1, max = 64, message = "Subject codename is required"))]
    #[schema(example = "MTH101")]
    pub subject_codename: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSubjectDto {
    #[validate(length(min = 1, max = 255, message = "Subject name must not be empty"))]
    pub subject_name: Option<String>,
    #[validate(length(min = 1, max = 64, message = "Subject codename must not be empty"))]
    pub subject_codename: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_subject_dto_validation() {
        let valid = CreateSubjectDto {
            subject_name: "Mathematics".to_string(),
            subject_codename: "MTH101".to_string(),
        };
        assert!(valid.validate().is_ok());

        let long_code = CreateSubjectDto {
            subject_name: "Mathematics".to_string(),
            subject_codename: "X".repeat(65),
        };
        assert!(long_code.validate().is_err());
    }
}
