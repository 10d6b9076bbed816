//! Schedule domain models and DTOs.
//!
//! A schedule is one timetable slot tying a teacher and a subject to a
//! class. Responses embed short summaries of all three.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::classes::ClassSummary;
use crate::subjects::SubjectSummary;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Schedule {
    pub id: Uuid,
    pub school_id: Uuid,
    pub teacher_id: Uuid,
    pub subject_id: Uuid,
    pub class_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeacherSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Schedule joined with its teacher, subject and class.
///
/// References are not enforced by the database, so a summary is absent when
/// its target has since been removed.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScheduleWithDetails {
    pub id: Uuid,
    pub school_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub teacher: Option<TeacherSummary>,
    pub subject: Option<SubjectSummary>,
    pub class: Option<ClassSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Flat row produced by the populated-schedule query.
#[derive(Debug, Clone, FromRow)]
pub struct ScheduleDetailRow {
    pub id: Uuid,
    pub school_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub teacher_id: Uuid,
    pub teacher_name: Option<String>,
    pub teacher_email: Option<String>,
    pub subject_id: Uuid,
    pub subject_name: Option<String>,
    pub subject_codename: Option<String>,
    pub class_id: Uuid,
    pub class_text: Option<String>,
    pub class_num: Option<i32>,
}

impl From<ScheduleDetailRow> for ScheduleWithDetails {
    fn from(row: ScheduleDetailRow) -> Self {
        let teacher = match (row.teacher_name, row.teacher_email) {
            (Some(name), Some(email)) => Some(TeacherSummary {
                id: row.teacher_id,
                name,
                email,
            }),
            _ => None,
        };
        let subject = match (row.subject_name, row.subject_codename) {
            (Some(subject_name), Some(subject_codename)) => Some(SubjectSummary {
                id: row.subject_id,
                subject_name,
                subject_codename,
            }),
            _ => None,
        };
        let class = match (row.class_text, row.class_num) {
            (Some(class_text), Some(class_num)) => Some(ClassSummary {
                id: row.class_id,
                class_text,
                class_num,
            }),
            _ => None,
        };

        Self {
            id: row.id,
            school_id: row.school_id,
            start_time: row.start_time,
            end_time: row.end_time,
            teacher,
            subject,
            class,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// References arrive as strings so a malformed id can be reported per field.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_window"))]
pub struct CreateScheduleDto {
    pub teacher: String,
    pub subject: String,
    #[serde(alias = "classId")]
    pub class_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_window"))]
pub struct UpdateScheduleDto {
    #[serde(alias = "teacherId")]
    pub teacher_id: Option<String>,
    #[serde(alias = "subjectId")]
    pub subject_id: Option<String>,
    #[serde(alias = "classId")]
    pub class_id: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

fn window_error() -> ValidationError {
    ValidationError::new("time_window").with_message("End time must be after start time".into())
}

fn validate_create_window(dto: &CreateScheduleDto) -> Result<(), ValidationError> {
    if dto.end_time <= dto.start_time {
        return Err(window_error());
    }
    Ok(())
}

fn validate_update_window(dto: &UpdateScheduleDto) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (dto.start_time, dto.end_time)
        && end <= start
    {
        return Err(window_error());
    }
    Ok(())
}

/// Checks a merged window, for updates that change only one end.
pub fn is_valid_window(start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    end > start
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_create_schedule_accepts_class_id_alias() {
        let json = r#"{
            "teacher": "7d4c7a2e-5f1b-4b4e-9f0a-3c2b1a0f9e8d",
            "subject": "1f2e3d4c-5b6a-4978-8695-a4b3c2d1e0f9",
            "classId": "0a1b2c3d-4e5f-4a6b-8c7d-9e0f1a2b3c4d",
            "start_time": "2025-01-06T08:00:00Z",
            "end_time": "2025-01-06T09:00:00Z"
        }"#;
        let dto: CreateScheduleDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.class_id, "0a1b2c3d-4e5f-4a6b-8c7d-9e0f1a2b3c4d");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_schedule_rejects_inverted_window() {
        let start = Utc::now();
        let dto = CreateScheduleDto {
            teacher: "t".to_string(),
            subject: "s".to_string(),
            class_id: "c".to_string(),
            start_time: start,
            end_time: start - Duration::minutes(30),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_schedule_window_checked_only_when_both_present() {
        let start = Utc::now();
        let only_end = UpdateScheduleDto {
            end_time: Some(start),
            ..Default::default()
        };
        assert!(only_end.validate().is_ok());

        let inverted = UpdateScheduleDto {
            start_time: Some(start),
            end_time: Some(start - Duration::hours(1)),
            ..Default::default()
        };
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_detail_row_drops_missing_references() {
        let now = Utc::now();
        let row = ScheduleDetailRow {
            id: Uuid::new_v4(),
            school_id: Uuid::new_v4(),
            start_time: now,
            end_time: now + Duration::hours(1),
            created_at: now,
            updated_at: now,
            teacher_id: Uuid::new_v4(),
            teacher_name: Some("Grace".to_string()),
            teacher_email: Some("grace@school.edu".to_string()),
            subject_id: Uuid::new_v4(),
            subject_name: None,
            subject_codename: None,
            class_id: Uuid::new_v4(),
            class_text: Some("Ten".to_string()),
            class_num: Some(10),
        };
        let details = ScheduleWithDetails::from(row);
        assert!(details.teacher.is_some());
        assert!(details.subject.is_none());
        assert_eq!(details.class.map(|c| c.class_num), Some(10));
    }
}
