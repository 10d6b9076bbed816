use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use schoolhub_core::{AppError, AssetStore, hash_password};
use schoolhub_observability::track_account_registered;

use crate::forms::UploadedFile;
use crate::images::{discard_image, store_image};
use crate::modules::schools::model::{PublicSchool, RegisterSchoolForm, School, UpdateSchoolForm};

const SCHOOL_COLUMNS: &str =
    "id, school_name, owner_name, email, school_image, school_image_id, created_at, updated_at";

const IMAGE_FOLDER: &str = "schools";

fn email_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        return AppError::conflict("Email is already registered");
    }
    AppError::from(e)
}

pub struct SchoolService;

impl SchoolService {
    async fn email_taken(db: &PgPool, email: &str, except: Option<Uuid>) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(
                   SELECT 1 FROM schools
                   WHERE LOWER(email) = LOWER($1) AND ($2::uuid IS NULL OR id <> $2)
               )"#,
        )
        .bind(email)
        .bind(except)
        .fetch_one(db)
        .await?;

        Ok(taken)
    }

    #[instrument(skip(db, assets, form, image), fields(email = %form.email))]
    pub async fn register_school(
        db: &PgPool,
        assets: &dyn AssetStore,
        form: RegisterSchoolForm,
        image: Option<UploadedFile>,
    ) -> Result<School, AppError> {
        let email = form.email.trim().to_lowercase();

        if Self::email_taken(db, &email, None).await? {
            return Err(AppError::conflict("Email is already registered"));
        }

        let hashed_password = hash_password(&form.password).await?;

        let stored = match &image {
            Some(file) => Some(store_image(assets, IMAGE_FOLDER, file).await?),
            None => None,
        };

        let result = sqlx::query_as::<_, School>(&format!(
            r#"INSERT INTO schools (school_name, owner_name, email, password, school_image, school_image_id)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {}"#,
            SCHOOL_COLUMNS
        ))
        .bind(form.school_name.trim())
        .bind(form.owner_name.trim())
        .bind(&email)
        .bind(&hashed_password)
        .bind(stored.as_ref().map(|s| s.url.as_str()))
        .bind(stored.as_ref().map(|s| s.public_id.as_str()))
        .fetch_one(db)
        .await;

        match result {
            Ok(school) => {
                track_account_registered("SCHOOL");
                Ok(school)
            }
            Err(e) => {
                discard_image(assets, stored.as_ref().map(|s| s.public_id.as_str())).await;
                Err(email_conflict(e))
            }
        }
    }

    /// Name and image of every school; contact details are left out.
    #[instrument(skip(db))]
    pub async fn get_public_schools(db: &PgPool) -> Result<Vec<PublicSchool>, AppError> {
        let schools = sqlx::query_as::<_, PublicSchool>(
            "SELECT school_name, school_image FROM schools ORDER BY school_name ASC",
        )
        .fetch_all(db)
        .await?;

        Ok(schools)
    }

    #[instrument(skip(db))]
    pub async fn get_school_by_id(db: &PgPool, school_id: Uuid) -> Result<School, AppError> {
        sqlx::query_as::<_, School>(&format!(
            "SELECT {} FROM schools WHERE id = $1",
            SCHOOL_COLUMNS
        ))
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("School not found")))
    }

    /// Partial update. A new image replaces the stored one, which is then
    /// removed from the asset store.
    #[instrument(skip(db, assets, form, image))]
    pub async fn update_school(
        db: &PgPool,
        assets: &dyn AssetStore,
        school_id: Uuid,
        form: UpdateSchoolForm,
        image: Option<UploadedFile>,
    ) -> Result<School, AppError> {
        let existing = Self::get_school_by_id(db, school_id).await?;

        let email = match form.email {
            Some(email) => {
                let email = email.trim().to_lowercase();
                if Self::email_taken(db, &email, Some(school_id)).await? {
                    return Err(AppError::conflict("Email is already registered"));
                }
                email
            }
            None => existing.email,
        };

        let hashed_password = match &form.password {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };

        let stored = match &image {
            Some(file) => Some(store_image(assets, IMAGE_FOLDER, file).await?),
            None => None,
        };

        let (school_image, school_image_id) = match &stored {
            Some(asset) => (Some(asset.url.clone()), Some(asset.public_id.clone())),
            None => (existing.school_image, existing.school_image_id.clone()),
        };

        let result = sqlx::query_as::<_, School>(&format!(
            r#"UPDATE schools
               SET school_name = $1, owner_name = $2, email = $3,
                   password = COALESCE($4, password),
                   school_image = $5, school_image_id = $6, updated_at = NOW()
               WHERE id = $7
               RETURNING {}"#,
            SCHOOL_COLUMNS
        ))
        .bind(
            form.school_name
                .map(|name| name.trim().to_string())
                .unwrap_or(existing.school_name),
        )
        .bind(
            form.owner_name
                .map(|name| name.trim().to_string())
                .unwrap_or(existing.owner_name),
        )
        .bind(&email)
        .bind(hashed_password)
        .bind(school_image)
        .bind(school_image_id)
        .bind(school_id)
        .fetch_one(db)
        .await;

        let school = match result {
            Ok(school) => school,
            Err(e) => {
                discard_image(assets, stored.as_ref().map(|s| s.public_id.as_str())).await;
                return Err(email_conflict(e));
            }
        };

        if stored.is_some() {
            discard_image(assets, existing.school_image_id.as_deref()).await;
        }

        Ok(school)
    }
}
