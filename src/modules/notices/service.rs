use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use schoolhub_core::AppError;

use crate::modules::notices::model::{Audience, CreateNoticeDto, Notice, UpdateNoticeDto};

const NOTICE_COLUMNS: &str =
    "id, school_id, title, message, date, audience, url, created_at, updated_at";

/// Removes repeated audiences, keeping first occurrence order.
fn dedupe_audience(audience: Vec<Audience>) -> Vec<Audience> {
    let mut unique = Vec::with_capacity(audience.len());
    for entry in audience {
        if !unique.contains(&entry) {
            unique.push(entry);
        }
    }
    unique
}

pub struct NoticeService;

impl NoticeService {
    #[instrument(skip(db))]
    pub async fn create_notice(
        db: &PgPool,
        school_id: Uuid,
        dto: CreateNoticeDto,
    ) -> Result<Notice, AppError> {
        let notice = sqlx::query_as::<_, Notice>(&format!(
            r#"INSERT INTO notices (school_id, title, message, date, audience, url)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {}"#,
            NOTICE_COLUMNS
        ))
        .bind(school_id)
        .bind(dto.title.trim())
        .bind(&dto.message)
        .bind(dto.date)
        .bind(dedupe_audience(dto.audience))
        .bind(&dto.url)
        .fetch_one(db)
        .await?;

        Ok(notice)
    }

    /// Notices of a school addressed to at least one of `audiences`, newest first.
    #[instrument(skip(db))]
    pub async fn get_notices(
        db: &PgPool,
        school_id: Uuid,
        audiences: &[Audience],
    ) -> Result<Vec<Notice>, AppError> {
        let notices = sqlx::query_as::<_, Notice>(&format!(
            r#"SELECT {} FROM notices
               WHERE school_id = $1 AND audience && $2::notice_audience[]
               ORDER BY created_at DESC"#,
            NOTICE_COLUMNS
        ))
        .bind(school_id)
        .bind(audiences.to_vec())
        .fetch_all(db)
        .await?;

        Ok(notices)
    }

    #[instrument(skip(db))]
    pub async fn get_notice_by_id(
        db: &PgPool,
        notice_id: Uuid,
        school_id: Uuid,
    ) -> Result<Notice, AppError> {
        sqlx::query_as::<_, Notice>(&format!(
            "SELECT {} FROM notices WHERE id = $1 AND school_id = $2",
            NOTICE_COLUMNS
        ))
        .bind(notice_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Notice not found")))
    }

    #[instrument(skip(db))]
    pub async fn update_notice(
        db: &PgPool,
        notice_id: Uuid,
        school_id: Uuid,
        dto: UpdateNoticeDto,
    ) -> Result<Notice, AppError> {
        let existing = Self::get_notice_by_id(db, notice_id, school_id).await?;

        let title = dto
            .title
            .map(|t| t.trim().to_string())
            .unwrap_or(existing.title);
        let message = dto.message.unwrap_or(existing.message);
        let date = dto.date.unwrap_or(existing.date);
        let audience = dto.audience.map(dedupe_audience).unwrap_or(existing.audience);
        let url = match dto.url {
            Some(url) => url,
            None => existing.url,
        };

        let notice = sqlx::query_as::<_, Notice>(&format!(
            r#"UPDATE notices
               SET title = $1, message = $2, date = $3, audience = $4, url = $5, updated_at = NOW()
               WHERE id = $6 AND school_id = $7
               RETURNING {}"#,
            NOTICE_COLUMNS
        ))
        .bind(title)
        .bind(message)
        .bind(date)
        .bind(audience)
        .bind(url)
        .bind(notice_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        Ok(notice)
    }

    #[instrument(skip(db))]
    pub async fn delete_notice(
        db: &PgPool,
        notice_id: Uuid,
        school_id: Uuid,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM notices WHERE id = $1 AND school_id = $2")
            .bind(notice_id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Notice not found")));
        }

        Ok(())
    }
}
