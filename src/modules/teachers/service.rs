use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use schoolhub_core::search::contains_pattern;
use schoolhub_core::{AppError, AssetStore, hash_password};
use schoolhub_observability::track_account_registered;

use crate::forms::UploadedFile;
use crate::images::{discard_image, store_image};
use crate::modules::teachers::model::{
    RegisterTeacherForm, Teacher, TeacherFilterParams, UpdateTeacherForm,
};

const TEACHER_COLUMNS: &str = "id, school_id, email, name, qualification, age, gender, \
     teacher_image, teacher_image_id, created_at, updated_at";

const IMAGE_FOLDER: &str = "teachers";

fn email_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        return AppError::conflict("Email is already registered");
    }
    AppError::from(e)
}

pub struct TeacherService;

impl TeacherService {
    async fn email_taken(db: &PgPool, email: &str, except: Option<Uuid>) -> Result<bool, AppError> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(
                   SELECT 1 FROM teachers
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
    pub async fn register_teacher(
        db: &PgPool,
        assets: &dyn AssetStore,
        school_id: Uuid,
        form: RegisterTeacherForm,
        image: Option<UploadedFile>,
    ) -> Result<Teacher, AppError> {
        let email = form.email.trim().to_lowercase();

        if Self::email_taken(db, &email, None).await? {
            return Err(AppError::conflict("Email is already registered"));
        }

        let hashed_password = hash_password(&form.password).await?;

        let stored = match &image {
            Some(file) => Some(store_image(assets, IMAGE_FOLDER, file).await?),
            None => None,
        };

        let result = sqlx::query_as::<_, Teacher>(&format!(
            r#"INSERT INTO teachers
                   (school_id, email, name, qualification, age, gender, teacher_image, teacher_image_id, password)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING {}"#,
            TEACHER_COLUMNS
        ))
        .bind(school_id)
        .bind(&email)
        .bind(form.name.trim())
        .bind(form.qualification.trim())
        .bind(form.age)
        .bind(form.gender.as_deref())
        .bind(stored.as_ref().map(|s| s.url.as_str()))
        .bind(stored.as_ref().map(|s| s.public_id.as_str()))
        .bind(&hashed_password)
        .fetch_one(db)
        .await;

        match result {
            Ok(teacher) => {
                track_account_registered("TEACHER");
                Ok(teacher)
            }
            Err(e) => {
                discard_image(assets, stored.as_ref().map(|s| s.public_id.as_str())).await;
                Err(email_conflict(e))
            }
        }
    }

    #[instrument(skip(db))]
    pub async fn get_teachers(
        db: &PgPool,
        school_id: Uuid,
        filters: TeacherFilterParams,
    ) -> Result<Vec<Teacher>, AppError> {
        let teachers = sqlx::query_as::<_, Teacher>(&format!(
            r#"SELECT {}
               FROM teachers
               WHERE school_id = $1 AND ($2::text IS NULL OR name ILIKE $2 ESCAPE '\')
               ORDER BY name ASC"#,
            TEACHER_COLUMNS
        ))
        .bind(school_id)
        .bind(filters.search.as_deref().map(contains_pattern))
        .fetch_all(db)
        .await?;

        Ok(teachers)
    }

    #[instrument(skip(db))]
    pub async fn get_teacher_by_id(
        db: &PgPool,
        teacher_id: Uuid,
        school_id: Uuid,
    ) -> Result<Teacher, AppError> {
        sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {} FROM teachers WHERE id = $1 AND school_id = $2",
            TEACHER_COLUMNS
        ))
        .bind(teacher_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Teacher not found")))
    }

    #[instrument(skip(db, assets, form, image))]
    pub async fn update_teacher(
        db: &PgPool,
        assets: &dyn AssetStore,
        teacher_id: Uuid,
        school_id: Uuid,
        form: UpdateTeacherForm,
        image: Option<UploadedFile>,
    ) -> Result<Teacher, AppError> {
        let existing = Self::get_teacher_by_id(db, teacher_id, school_id).await?;

        let email = match form.email {
            Some(email) => {
                let email = email.trim().to_lowercase();
                if Self::email_taken(db, &email, Some(teacher_id)).await? {
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

        let (teacher_image, teacher_image_id) = match &stored {
            Some(asset) => (Some(asset.url.clone()), Some(asset.public_id.clone())),
            None => (existing.teacher_image, existing.teacher_image_id.clone()),
        };

        let result = sqlx::query_as::<_, Teacher>(&format!(
            r#"UPDATE teachers
               SET email = $1, name = $2, qualification = $3, age = $4, gender = $5,
                   teacher_image = $6, teacher_image_id = $7,
                   password = COALESCE($8, password), updated_at = NOW()
               WHERE id = $9 AND school_id = $10
               RETURNING {}"#,
            TEACHER_COLUMNS
        ))
        .bind(&email)
        .bind(
            form.name
                .map(|name| name.trim().to_string())
                .unwrap_or(existing.name),
        )
        .bind(
            form.qualification
                .map(|q| q.trim().to_string())
                .unwrap_or(existing.qualification),
        )
        .bind(form.age.or(existing.age))
        .bind(form.gender.or(existing.gender))
        .bind(teacher_image)
        .bind(teacher_image_id)
        .bind(hashed_password)
        .bind(teacher_id)
        .bind(school_id)
        .fetch_one(db)
        .await;

        let teacher = match result {
            Ok(teacher) => teacher,
            Err(e) => {
                discard_image(assets, stored.as_ref().map(|s| s.public_id.as_str())).await;
                return Err(email_conflict(e));
            }
        };

        if stored.is_some() {
            discard_image(assets, existing.teacher_image_id.as_deref()).await;
        }

        Ok(teacher)
    }

    /// Deletes the teacher and then its stored image.
    #[instrument(skip(db, assets))]
    pub async fn delete_teacher(
        db: &PgPool,
        assets: &dyn AssetStore,
        teacher_id: Uuid,
        school_id: Uuid,
    ) -> Result<(), AppError> {
        let image_id = sqlx::query_scalar::<_, Option<String>>(
            "DELETE FROM teachers WHERE id = $1 AND school_id = $2 RETURNING teacher_image_id",
        )
        .bind(teacher_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Teacher not found")))?;

        discard_image(assets, image_id.as_deref()).await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::http::StatusCode;
    use schoolhub_core::LocalAssetStore;

    fn temp_store() -> LocalAssetStore {
        LocalAssetStore::new(
            std::env::temp_dir().join(format!("schoolhub-teachers-{}", Uuid::new_v4())),
            "http://localhost:3000/files".to_string(),
            1024 * 1024,
        )
    }

    async fn create_test_school(pool: &PgPool) -> Uuid {
        sqlx::query_scalar::<_, Uuid>(
            r#"INSERT INTO schools (school_name, owner_name, email, password)
               VALUES ('Test School', 'Owner', $1, 'hashed') RETURNING id"#,
        )
        .bind(format!("school-{}@test.com", Uuid::new_v4()))
        .fetch_one(pool)
        .await
        .unwrap()
    }

    fn register_form(name: &str) -> RegisterTeacherForm {
        RegisterTeacherForm {
            name: name.to_string(),
            email: format!("teacher-{}@test.com", Uuid::new_v4()),
            qualification: "BSc Mathematics".to_string(),
            password: "secret123".to_string(),
            age: Some(35),
            gender: Some("female".to_string()),
        }
    }

    fn image() -> UploadedFile {
        UploadedFile {
            file_name: "me.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: Bytes::from_static(b"jpeg-bytes"),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_register_without_image(pool: PgPool) {
        let assets = temp_store();
        let school_id = create_test_school(&pool).await;

        let teacher =
            TeacherService::register_teacher(&pool, &assets, school_id, register_form("Ada"), None)
                .await
                .unwrap();

        assert_eq!(teacher.school_id, school_id);
        assert_eq!(teacher.age, Some(35));
        assert!(teacher.teacher_image.is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_search_is_case_insensitive_and_scoped(pool: PgPool) {
        let assets = temp_store();
        let school_a = create_test_school(&pool).await;
        let school_b = create_test_school(&pool).await;

        TeacherService::register_teacher(&pool, &assets, school_a, register_form("Ada Lovelace"), None)
            .await
            .unwrap();
        TeacherService::register_teacher(&pool, &assets, school_a, register_form("Alan Turing"), None)
            .await
            .unwrap();
        TeacherService::register_teacher(&pool, &assets, school_b, register_form("Ada Byron"), None)
            .await
            .unwrap();

        let found = TeacherService::get_teachers(
            &pool,
            school_a,
            TeacherFilterParams {
                search: Some("ada".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Ada Lovelace");

        let all = TeacherService::get_teachers(&pool, school_a, TeacherFilterParams::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_search_treats_wildcards_literally(pool: PgPool) {
        let assets = temp_store();
        let school_id = create_test_school(&pool).await;
        for name in ["Ada", "Grace"] {
            TeacherService::register_teacher(&pool, &assets, school_id, register_form(name), None)
                .await
                .unwrap();
        }

        for term in ["%", "_", "G%e"] {
            let found = TeacherService::get_teachers(
                &pool,
                school_id,
                TeacherFilterParams {
                    search: Some(term.to_string()),
                },
            )
            .await
            .unwrap();
            assert!(found.is_empty(), "search {:?} matched {} rows", term, found.len());
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_and_delete_in_other_school_not_found(pool: PgPool) {
        let assets = temp_store();
        let school_a = create_test_school(&pool).await;
        let school_b = create_test_school(&pool).await;
        let teacher =
            TeacherService::register_teacher(&pool, &assets, school_a, register_form("Ada"), None)
                .await
                .unwrap();

        let err = TeacherService::update_teacher(
            &pool,
            &assets,
            teacher.id,
            school_b,
            UpdateTeacherForm::default(),
            None,
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = TeacherService::delete_teacher(&pool, &assets, teacher.id, school_b)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        assert!(
            TeacherService::get_teacher_by_id(&pool, teacher.id, school_a)
                .await
                .is_ok()
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_removes_image(pool: PgPool) {
        let assets = temp_store();
        let school_id = create_test_school(&pool).await;
        let teacher = TeacherService::register_teacher(
            &pool,
            &assets,
            school_id,
            register_form("Ada"),
            Some(image()),
        )
        .await
        .unwrap();
        let image_id = teacher.teacher_image_id.clone().unwrap();
        assert!(assets.base_dir().join(&image_id).exists());

        TeacherService::delete_teacher(&pool, &assets, teacher.id, school_id)
            .await
            .unwrap();

        assert!(!assets.base_dir().join(&image_id).exists());
        let err = TeacherService::get_teacher_by_id(&pool, teacher.id, school_id)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_password_only(pool: PgPool) {
        let assets = temp_store();
        let school_id = create_test_school(&pool).await;
        let teacher =
            TeacherService::register_teacher(&pool, &assets, school_id, register_form("Ada"), None)
                .await
                .unwrap();

        let updated = TeacherService::update_teacher(
            &pool,
            &assets,
            teacher.id,
            school_id,
            UpdateTeacherForm {
                password: Some("newsecret".to_string()),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
        assert_eq!(updated.name, teacher.name);
        assert_eq!(updated.qualification, teacher.qualification);

        let hash = sqlx::query_scalar::<_, String>("SELECT password FROM teachers WHERE id = $1")
            .bind(teacher.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(schoolhub_core::verify_password("newsecret", &hash).await.unwrap());
    }
}
