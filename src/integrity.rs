//! Delete guard for records that other records point at.
//!
//! Students reference their class by label and schedules reference class and
//! subject by id, none of it backed by a foreign key. Before a class or
//! subject is removed its dependents are counted within the same school.
//!
//! The count and the delete are separate statements, so a dependent created
//! in between is not seen.

use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use schoolhub_core::AppError;
use schoolhub_observability::track_delete_blocked;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Class,
    Subject,
}

impl DeleteTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeleteTarget::Class => "class",
            DeleteTarget::Subject => "subject",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependentCount {
    pub source: &'static str,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteVerdict {
    Allow,
    Deny { dependents: Vec<DependentCount> },
}

impl DeleteVerdict {
    pub fn from_counts(counts: Vec<DependentCount>) -> Self {
        let dependents: Vec<DependentCount> =
            counts.into_iter().filter(|dep| dep.count > 0).collect();

        if dependents.is_empty() {
            DeleteVerdict::Allow
        } else {
            DeleteVerdict::Deny { dependents }
        }
    }

    pub fn into_result(self, target: DeleteTarget) -> Result<(), AppError> {
        match self {
            DeleteVerdict::Allow => Ok(()),
            DeleteVerdict::Deny { dependents } => {
                track_delete_blocked(target.as_str());
                tracing::info!(entity = target.as_str(), ?dependents, "Delete blocked by dependents");
                Err(AppError::dependency_in_use(format!(
                    "This {} is already in use",
                    target.as_str()
                )))
            }
        }
    }
}

/// Matches a student's class label against class `c`.
pub(crate) const STUDENT_CLASS_MATCHES: &str =
    "(s.student_class = c.id::text OR s.student_class = c.class_num::text OR s.student_class = c.class_text)";

#[instrument(skip(db))]
pub async fn can_delete(
    db: &PgPool,
    target: DeleteTarget,
    id: Uuid,
    school_id: Uuid,
) -> Result<DeleteVerdict, AppError> {
    let counts = match target {
        DeleteTarget::Class => {
            let students = sqlx::query_scalar::<_, i64>(&format!(
                r#"SELECT COUNT(*) FROM students s
                   JOIN classes c ON c.id = $1 AND c.school_id = $2
                   WHERE s.school_id = $2 AND {}"#,
                STUDENT_CLASS_MATCHES
            ))
            .bind(id)
            .bind(school_id)
            .fetch_one(db)
            .await?;

            let schedules = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM schedules WHERE class_id = $1 AND school_id = $2",
            )
            .bind(id)
            .bind(school_id)
            .fetch_one(db)
            .await?;

            vec![
                DependentCount {
                    source: "students",
                    count: students,
                },
                DependentCount {
                    source: "schedules",
                    count: schedules,
                },
            ]
        }
        DeleteTarget::Subject => {
            let schedules = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM schedules WHERE subject_id = $1 AND school_id = $2",
            )
            .bind(id)
            .bind(school_id)
            .fetch_one(db)
            .await?;

            vec![DependentCount {
                source: "schedules",
                count: schedules,
            }]
        }
    };

    Ok(DeleteVerdict::from_counts(counts))
}
