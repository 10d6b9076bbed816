use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use schoolhub_core::search::contains_pattern;
use schoolhub_core::{AppError, AssetStore, hash_password};
use schoolhub_observability::track_account_registered;

use crate::forms::UploadedFile;
use crate::images::{discard_image, store_image};
use crate::modules::students::model::{
    RegisterStudentForm, Student, StudentFilterParams, UpdateStudentDto,
};

const STUDENT_COLUMNS: &str = "id, school_id, email, name, student_class, age, gender, guardian, \
     guardian_phone, student_image, student_image_id, created_at, updated_at";

const IMAGE_FOLDER: &str = "students";

fn email_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        return AppError::conflict("Email is already registered");
    }
    AppError::from(e)
}

pub struct StudentService;

impl StudentService {
    async fn email_taken(db: &PgPool, email: &str, except: Option<Uuid>) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(
                   SELECT 1 FROM students
                   WHERE LOWER(email) = LOWER($1) AND ($2::uuid IS NULL OR id <> $2)
               )"#,
        )
        .bind(email)
        .bind(except)
        .fetch_one(db)
        .await?;

        Ok(taken)
    }

    /// Registers a student. The image is mandatory.
    #[instrument(skip(db, assets, form, image), fields(email = %form.email))]
    pub async fn register_student(
        db: &PgPool,
        assets: &dyn AssetStore,
        school_id: Uuid,
        form: RegisterStudentForm,
        image: Option<UploadedFile>,
    ) -> Result<Student, AppError> {
        let image = image.ok_or_else(|| AppError::validation("Student image is required"))?;
        let email = form.email.trim().to_lowercase();

        if Self::email_taken(db, &email, None).await? {
            return Err(AppError::conflict("Email is already registered"));
        }

        let hashed_password = hash_password(&form.password).await?;
        let stored = store_image(assets, IMAGE_FOLDER, &image).await?;

        let result = sqlx::query_as::<_, Student>(&format!(
            r#"INSERT INTO students
                   (school_id, email, name, student_class, age, gender, guardian, guardian_phone,
                    student_image, student_image_id, password)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
               RETURNING {}"#,
            STUDENT_COLUMNS
        ))
        .bind(school_id)
        .bind(&email)
        .bind(form.name.trim())
        .bind(form.student_class.as_deref().map(str::trim))
        .bind(form.age)
        .bind(form.gender.as_deref())
        .bind(form.guardian.trim())
        .bind(form.guardian_phone.as_deref())
        .bind(&stored.url)
        .bind(&stored.public_id)
        .bind(&hashed_password)
        .fetch_one(db)
        .await;

        match result {
            Ok(student) => {
                track_account_registered("STUDENT");
                Ok(student)
            }
            Err(e) => {
                discard_image(assets, Some(&stored.public_id)).await;
                Err(email_conflict(e))
            }
        }
    }

    #[instrument(skip(db))]
    pub async fn get_students(
        db: &PgPool,
        school_id: Uuid,
        filters: StudentFilterParams,
    ) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as::<_, Student>(&format!(
            r#"SELECT {}
               FROM students
               WHERE school_id = $1
                 AND ($2::text IS NULL OR name ILIKE $2 ESCAPE '\')
                 AND ($3::text IS NULL OR student_class = $3)
               ORDER BY name ASC"#,
            STUDENT_COLUMNS
        ))
        .bind(school_id)
        .bind(filters.search.as_deref().map(contains_pattern))
        .bind(filters.student_class)
        .fetch_all(db)
        .await?;

        Ok(students)
    }

    #[instrument(skip(db))]
    pub async fn get_student_by_id(
        db: &PgPool,
        student_id: Uuid,
        school_id: Uuid,
    ) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {} FROM students WHERE id = $1 AND school_id = $2",
            STUDENT_COLUMNS
        ))
        .bind(student_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        student_id: Uuid,
        school_id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let existing = Self::get_student_by_id(db, student_id, school_id).await?;

        let email = match dto.email {
            Some(email) => {
                let email = email.trim().to_lowercase();
                if Self::email_taken(db, &email, Some(student_id)).await? {
                    return Err(AppError::conflict("Email is already registered"));
                }
                email
            }
            None => existing.email,
        };

        let hashed_password = match &dto.password {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };

        let student = sqlx::query_as::<_, Student>(&format!(
            r#"UPDATE students
               SET email = $1, name = $2, student_class = $3, age = $4, gender = $5,
                   guardian = $6, guardian_phone = $7,
                   password = COALESCE($8, password), updated_at = NOW()
               WHERE id = $9 AND school_id = $10
               RETURNING {}"#,
            STUDENT_COLUMNS
        ))
        .bind(&email)
        .bind(
            dto.name
                .map(|name| name.trim().to_string())
                .unwrap_or(existing.name),
        )
        .bind(
            dto.student_class
                .map(|class| class.trim().to_string())
                .or(existing.student_class),
        )
        .bind(dto.age.or(existing.age))
        .bind(dto.gender.or(existing.gender))
        .bind(
            dto.guardian
                .map(|guardian| guardian.trim().to_string())
                .unwrap_or(existing.guardian),
        )
        .bind(dto.guardian_phone.or(existing.guardian_phone))
        .bind(hashed_password)
        .bind(student_id)
        .bind(school_id)
        .fetch_one(db)
        .await
        .map_err(email_conflict)?;

        Ok(student)
    }

    /// Deletes the student and then its stored image.
    #[instrument(skip(db, assets))]
    pub async fn delete_student(
        db: &PgPool,
        assets: &dyn AssetStore,
        student_id: Uuid,
        school_id: Uuid,
    ) -> Result<(), AppError> {
        let image_id = sqlx::query_scalar::<_, String>(
            "DELETE FROM students WHERE id = $1 AND school_id = $2 RETURNING student_image_id",
        )
        .bind(student_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        discard_image(assets, Some(&image_id)).await;

        Ok(())
    }
}
