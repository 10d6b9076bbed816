use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use schoolhub_core::AppError;

use crate::integrity::{DeleteTarget, can_delete};
use crate::modules::subjects::model::{CreateSubjectDto, Subject, UpdateSubjectDto};

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(db))]
    pub async fn create_subject(
        db: &PgPool,
        school_id: Uuid,
        dto: CreateSubjectDto,
    ) -> Result<Subject, AppError> {
        let subject = sqlx::query_as::<_, Subject>(
            r#"INSERT INTO subjects (school_id, subject_name, subject_codename)
               VALUES ($1, $2, $3)
               RETURNING id, school_id, subject_name, subject_codename, created_at, updated_at"#,
        )
        .bind(school_id)
        .bind(dto.subject_name.trim())
        .bind(dto.subject_codename.trim())
        .fetch_one(db)
        .await?;

        Ok(subject)
    }

    #[instrument(skip(db))]
    pub async fn get_subjects(db: &PgPool, school_id: Uuid) -> Result<Vec<Subject>, AppError> {
        let subjects = sqlx::query_as::<_, Subject>(
            r#"SELECT id, school_id, subject_name, subject_codename, created_at, updated_at
               FROM subjects
               WHERE school_id = $1
               ORDER BY subject_name ASC"#,
        )
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(subjects)
    }

    #[instrument(skip(db))]
    pub async fn get_subject_by_id(
        db: &PgPool,
        subject_id: Uuid,
        school_id: Uuid,
    ) -> Result<Subject, AppError> {
        sqlx::query_as::<_, Subject>(
            r#"SELECT id, school_id, subject_name, subject_codename, created_at, updated_at
               FROM subjects
               WHERE id = $1 AND school_id = $2"#,
        )
        .bind(subject_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Subject not found")))
    }

    #[instrument(skip(db))]
    pub async fn update_subject(
        db: &PgPool,
        subject_id: Uuid,
        school_id: Uuid,
        dto: UpdateSubjectDto,
    ) -> Result<Subject, AppError> {
        let existing = Self::get_subject_by_id(db, subject_id, school_id).await?;

        let subject_name = dto
            .subject_name
            .map(|name| name.trim().to_string())
            .unwrap_or(existing.subject_name);
        let subject_codename = dto
            .subject_codename
            .map(|code| code.trim().to_string())
            .unwrap_or(existing.subject_codename);

        let subject = sqlx::query_as::<_, Subject>(
            r#"UPDATE subjects
               SET subject_name = $1, subject_codename = $2, updated_at = NOW()
               WHERE id = $3 AND school_id = $4
               RETURNING id, school_id, subject_name, subject_codename, created_at, updated_at"#,
        )
        .bind(subject_name)
        .bind(subject_codename)
        .bind(subject_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        Ok(subject)
    }

    #[instrument(skip(db))]
    pub async fn delete_subject(
        db: &PgPool,
        subject_id: Uuid,
        school_id: Uuid,
    ) -> Result<(), AppError> {
        Self::get_subject_by_id(db, subject_id, school_id).await?;

        can_delete(db, DeleteTarget::Subject, subject_id, school_id)
            .await?
            .into_result(DeleteTarget::Subject)?;

        let result = sqlx::query("DELETE FROM subjects WHERE id = $1 AND school_id = $2")
            .bind(subject_id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Subject not found")));
        }

        Ok(())
    }
}
