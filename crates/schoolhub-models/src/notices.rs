//! Notice domain models and audience visibility.

use chrono::{DateTime, Utc};
use schoolhub_auth::Role;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidateUrl, ValidationError};

/// Who a notice is addressed to. Stored as the `notice_audience` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "notice_audience")]
pub enum Audience {
    Website,
    Teacher,
    Student,
}

/// Audiences a caller may read.
///
/// The owning school sees every notice, teachers and students see public
/// notices plus those addressed to their role, anonymous callers only
/// public ones.
pub fn visible_audiences(role: Option<Role>) -> Vec<Audience> {
    match role {
        Some(Role::School) => vec![Audience::Website, Audience::Teacher, Audience::Student],
        Some(Role::Teacher) => vec![Audience::Website, Audience::Teacher],
        Some(Role::Student) => vec![Audience::Website, Audience::Student],
        None => vec![Audience::Website],
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notice {
    pub id: Uuid,
    pub school_id: Uuid,
    pub title: String,
    pub message: String,
    /// Date the notice refers to
    pub date: DateTime<Utc>,
    pub audience: Vec<Audience>,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateNoticeDto {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    pub date: DateTime<Utc>,
    #[validate(length(min = 1, message = "Audience must not be empty"))]
    pub audience: Vec<Audience>,
    #[validate(url(message = "Url is invalid"))]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_url"))]
pub struct UpdateNoticeDto {
    #[validate(length(min = 1, max = 255, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Message must not be empty"))]
    pub message: Option<String>,
    pub date: Option<DateTime<Utc>>,
    #[validate(length(min = 1, message = "Audience must not be empty"))]
    pub audience: Option<Vec<Audience>>,
    /// Omit to keep the current link, `null` to remove it.
    #[serde(default, deserialize_with = "schoolhub_core::serde::deserialize_nullable")]
    #[schema(value_type = Option<String>, nullable)]
    pub url: Option<Option<String>>,
}

fn validate_update_url(dto: &UpdateNoticeDto) -> Result<(), ValidationError> {
    if let Some(Some(url)) = &dto.url
        && !url.validate_url()
    {
        return Err(ValidationError::new("url").with_message("Url is invalid".into()));
    }
    Ok(())
}
