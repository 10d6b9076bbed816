use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use schoolhub_core::AppError;

use crate::integrity::{DeleteTarget, can_delete};
use crate::modules::classes::model::{Class, CreateClassDto, UpdateClassDto};

pub struct ClassService;

impl ClassService {
    #[instrument(skip(db))]
    pub async fn create_class(
        db: &PgPool,
        school_id: Uuid,
        dto: CreateClassDto,
    ) -> Result<Class, AppError> {
        let class = sqlx::query_as::<_, Class>(
            r#"INSERT INTO classes (school_id, class_text, class_num)
               VALUES ($1, $2, $3)
               RETURNING id, school_id, class_text, class_num, created_at, updated_at"#,
        )
        .bind(school_id)
        .bind(dto.class_text.trim())
        .bind(dto.class_num)
        .fetch_one(db)
        .await?;

        Ok(class)
    }

    #[instrument(skip(db))]
    pub async fn get_classes(db: &PgPool, school_id: Uuid) -> Result<Vec<Class>, AppError> {
        let classes = sqlx::query_as::<_, Class>(
            r#"SELECT id, school_id, class_text, class_num, created_at, updated_at
               FROM classes
               WHERE school_id = $1
               ORDER BY class_num ASC, class_text ASC"#,
        )
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(classes)
    }

    #[instrument(skip(db))]
    pub async fn get_class_by_id(
        db: &PgPool,
        class_id: Uuid,
        school_id: Uuid,
    ) -> Result<Class, AppError> {
        sqlx::query_as::<_, Class>(
            r#"SELECT id, school_id, class_text, class_num, created_at, updated_at
               FROM classes
               WHERE id = $1 AND school_id = $2"#,
        )
        .bind(class_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Class not found")))
    }

    #[instrument(skip(db))]
    pub async fn update_class(
        db: &PgPool,
        class_id: Uuid,
        school_id: Uuid,
        dto: UpdateClassDto,
    ) -> Result<Class, AppError> {
        let existing = Self::get_class_by_id(db, class_id, school_id).await?;

        let class_text = dto
            .class_text
            .map(|text| text.trim().to_string())
            .unwrap_or(existing.class_text);
        let class_num = dto.class_num.unwrap_or(existing.class_num);

        let class = sqlx::query_as::<_, Class>(
            r#"UPDATE classes
               SET class_text = $1, class_num = $2, updated_at = NOW()
               WHERE id = $3 AND school_id = $4
               RETURNING id, school_id, class_text, class_num, created_at, updated_at"#,
        )
        .bind(class_text)
        .bind(class_num)
        .bind(class_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        Ok(class)
    }

    /// Refuses while a student or schedule of the same school refers to the class.
    #[instrument(skip(db))]
    pub async fn delete_class(db: &PgPool, class_id: Uuid, school_id: Uuid) -> Result<(), AppError> {
        Self::get_class_by_id(db, class_id, school_id).await?;

        can_delete(db, DeleteTarget::Class, class_id, school_id)
            .await?
            .into_result(DeleteTarget::Class)?;

        let result = sqlx::query("DELETE FROM classes WHERE id = $1 AND school_id = $2")
            .bind(class_id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Class not found")));
        }

        Ok(())
    }
}
