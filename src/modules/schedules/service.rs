use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use schoolhub_core::AppError;

use crate::modules::schedules::model::{
    CreateScheduleDto, Schedule, ScheduleDetailRow, ScheduleWithDetails, UpdateScheduleDto,
    is_valid_window,
};
use crate::validator::parse_id;

const SCHEDULE_COLUMNS: &str =
    "id, school_id, teacher_id, subject_id, class_id, start_time, end_time, created_at, updated_at";

/// Schedules joined with whatever teacher, subject and class still exist in
/// the same school.
const DETAIL_SELECT: &str = r#"SELECT sc.id, sc.school_id, sc.start_time, sc.end_time,
           sc.created_at, sc.updated_at,
           sc.teacher_id, t.name AS teacher_name, t.email AS teacher_email,
           sc.subject_id, su.subject_name, su.subject_codename,
           sc.class_id, c.class_text, c.class_num
    FROM schedules sc
    LEFT JOIN teachers t ON t.id = sc.teacher_id AND t.school_id = sc.school_id
    LEFT JOIN subjects su ON su.id = sc.subject_id AND su.school_id = sc.school_id
    LEFT JOIN classes c ON c.id = sc.class_id AND c.school_id = sc.school_id"#;

#[derive(Debug, Clone, Copy)]
enum Reference {
    Teacher,
    Subject,
    Class,
}

impl Reference {
    fn table(self) -> &'static str {
        match self {
            Reference::Teacher => "teachers",
            Reference::Subject => "subjects",
            Reference::Class => "classes",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Reference::Teacher => "teacher",
            Reference::Subject => "subject",
            Reference::Class => "class",
        }
    }

    fn not_found(self) -> AppError {
        let message = match self {
            Reference::Teacher => "Teacher not found",
            Reference::Subject => "Subject not found",
            Reference::Class => "Class not found",
        };
        AppError::not_found(anyhow::anyhow!(message))
    }
}

pub struct ScheduleService;

impl ScheduleService {
    /// Parses `raw` and checks that it names a record of the same school.
    async fn resolve(
        db: &PgPool,
        reference: Reference,
        raw: &str,
        school_id: Uuid,
    ) -> Result<Uuid, AppError> {
        let id = parse_id(raw, reference.label())?;

        let exists = sqlx::query_scalar::<_, bool>(&format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1 AND school_id = $2)",
            reference.table()
        ))
        .bind(id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        if !exists {
            return Err(reference.not_found());
        }

        Ok(id)
    }

    async fn resolve_optional(
        db: &PgPool,
        reference: Reference,
        raw: Option<&str>,
        school_id: Uuid,
    ) -> Result<Option<Uuid>, AppError> {
        match raw {
            Some(raw) => Ok(Some(Self::resolve(db, reference, raw, school_id).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(db))]
    pub async fn create_schedule(
        db: &PgPool,
        school_id: Uuid,
        dto: CreateScheduleDto,
    ) -> Result<Schedule, AppError> {
        let teacher_id = Self::resolve(db, Reference::Teacher, &dto.teacher, school_id).await?;
        let subject_id = Self::resolve(db, Reference::Subject, &dto.subject, school_id).await?;
        let class_id = Self::resolve(db, Reference::Class, &dto.class_id, school_id).await?;

        let schedule = sqlx::query_as::<_, Schedule>(&format!(
            r#"INSERT INTO schedules (school_id, teacher_id, subject_id, class_id, start_time, end_time)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {}"#,
            SCHEDULE_COLUMNS
        ))
        .bind(school_id)
        .bind(teacher_id)
        .bind(subject_id)
        .bind(class_id)
        .bind(dto.start_time)
        .bind(dto.end_time)
        .fetch_one(db)
        .await?;

        Ok(schedule)
    }

    #[instrument(skip(db))]
    pub async fn get_schedules(
        db: &PgPool,
        school_id: Uuid,
    ) -> Result<Vec<ScheduleWithDetails>, AppError> {
        let rows = sqlx::query_as::<_, ScheduleDetailRow>(&format!(
            "{} WHERE sc.school_id = $1 ORDER BY sc.start_time ASC",
            DETAIL_SELECT
        ))
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(rows.into_iter().map(ScheduleWithDetails::from).collect())
    }

    /// Schedules of the class a label resolves to (id, number or text).
    #[instrument(skip(db))]
    pub async fn get_schedules_for_class_label(
        db: &PgPool,
        school_id: Uuid,
        class_label: &str,
    ) -> Result<Vec<ScheduleWithDetails>, AppError> {
        let rows = sqlx::query_as::<_, ScheduleDetailRow>(&format!(
            r#"{} WHERE sc.school_id = $1
                 AND sc.class_id IN (
                     SELECT cl.id FROM classes cl
                     WHERE cl.school_id = $1
                       AND (cl.id::text = $2 OR cl.class_num::text = $2 OR cl.class_text = $2)
                 )
               ORDER BY sc.start_time ASC"#,
            DETAIL_SELECT
        ))
        .bind(school_id)
        .bind(class_label)
        .fetch_all(db)
        .await?;

        Ok(rows.into_iter().map(ScheduleWithDetails::from).collect())
    }

    /// Timetable of a student's class. A student without a class has none.
    #[instrument(skip(db))]
    pub async fn get_student_schedules(
        db: &PgPool,
        student_id: Uuid,
        school_id: Uuid,
    ) -> Result<Vec<ScheduleWithDetails>, AppError> {
        let student_class = sqlx::query_scalar::<_, Option<String>>(
            "SELECT student_class FROM students WHERE id = $1 AND school_id = $2",
        )
        .bind(student_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        match student_class {
            Some(label) => Self::get_schedules_for_class_label(db, school_id, &label).await,
            None => Ok(Vec::new()),
        }
    }

    #[instrument(skip(db))]
    pub async fn get_schedule_by_id(
        db: &PgPool,
        schedule_id: Uuid,
        school_id: Uuid,
    ) -> Result<Schedule, AppError> {
        sqlx::query_as::<_, Schedule>(&format!(
            "SELECT {} FROM schedules WHERE id = $1 AND school_id = $2",
            SCHEDULE_COLUMNS
        ))
        .bind(schedule_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Schedule not found")))
    }

    /// Partial update.
    ///
    /// `assigned_teacher` is set when a teacher is editing; the schedule must
    /// then belong to that teacher.
    #[instrument(skip(db))]
    pub async fn update_schedule(
        db: &PgPool,
        schedule_id: Uuid,
        school_id: Uuid,
        assigned_teacher: Option<Uuid>,
        dto: UpdateScheduleDto,
    ) -> Result<Schedule, AppError> {
        let existing = Self::get_schedule_by_id(db, schedule_id, school_id).await?;

        if let Some(teacher_id) = assigned_teacher
            && existing.teacher_id != teacher_id
        {
            return Err(AppError::forbidden("Not authorized"));
        }

        let teacher_id =
            Self::resolve_optional(db, Reference::Teacher, dto.teacher_id.as_deref(), school_id)
                .await?
                .unwrap_or(existing.teacher_id);
        let subject_id =
            Self::resolve_optional(db, Reference::Subject, dto.subject_id.as_deref(), school_id)
                .await?
                .unwrap_or(existing.subject_id);
        let class_id =
            Self::resolve_optional(db, Reference::Class, dto.class_id.as_deref(), school_id)
                .await?
                .unwrap_or(existing.class_id);

        let start_time = dto.start_time.unwrap_or(existing.start_time);
        let end_time = dto.end_time.unwrap_or(existing.end_time);
        if !is_valid_window(start_time, end_time) {
            return Err(AppError::validation("End time must be after start time"));
        }

        let schedule = sqlx::query_as::<_, Schedule>(&format!(
            r#"UPDATE schedules
               SET teacher_id = $1, subject_id = $2, class_id = $3,
                   start_time = $4, end_time = $5, updated_at = NOW()
               WHERE id = $6 AND school_id = $7
               RETURNING {}"#,
            SCHEDULE_COLUMNS
        ))
        .bind(teacher_id)
        .bind(subject_id)
        .bind(class_id)
        .bind(start_time)
        .bind(end_time)
        .bind(schedule_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        Ok(schedule)
    }

    #[instrument(skip(db))]
    pub async fn delete_schedule(
        db: &PgPool,
        schedule_id: Uuid,
        school_id: Uuid,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1 AND school_id = $2")
            .bind(schedule_id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Schedule not found")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    struct Fixture {
        school_id: Uuid,
        teacher_id: Uuid,
        subject_id: Uuid,
        class_id: Uuid,
    }

    async fn create_fixture(pool: &PgPool) -> Fixture {
        let school_id = sqlx::query_scalar::<_, Uuid>(
            r#"INSERT INTO schools (school_name, owner_name, email, password)
               VALUES ('Test School', 'Owner', $1, 'hashed') RETURNING id"#,
        )
        .bind(format!("school-{}@test.com", Uuid::new_v4()))
        .fetch_one(pool)
        .await
        .unwrap();

        let teacher_id = sqlx::query_scalar::<_, Uuid>(
            r#"INSERT INTO teachers (school_id, email, name, qualification, password)
               VALUES ($1, $2, 'Ada', 'BSc', 'hashed') RETURNING id"#,
        )
        .bind(school_id)
        .bind(format!("teacher-{}@test.com", Uuid::new_v4()))
        .fetch_one(pool)
        .await
        .unwrap();

        let subject_id = sqlx::query_scalar::<_, Uuid>(
            r#"INSERT INTO subjects (school_id, subject_name, subject_codename)
               VALUES ($1, 'Mathematics', 'MTH101') RETURNING id"#,
        )
        .bind(school_id)
        .fetch_one(pool)
        .await
        .unwrap();

        let class_id = sqlx::query_scalar::<_, Uuid>(
            r#"INSERT INTO classes (school_id, class_text, class_num)
               VALUES ($1, 'Grade 10', 10) RETURNING id"#,
        )
        .bind(school_id)
        .fetch_one(pool)
        .await
        .unwrap();

        Fixture {
            school_id,
            teacher_id,
            subject_id,
            class_id,
        }
    }

    fn nine_am() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap()
    }

    fn create_dto(f: &Fixture) -> CreateScheduleDto {
        CreateScheduleDto {
            teacher: f.teacher_id.to_string(),
            subject: f.subject_id.to_string(),
            class_id: f.class_id.to_string(),
            start_time: nine_am(),
            end_time: nine_am() + Duration::hours(1),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_and_list_populated(pool: PgPool) {
        let f = create_fixture(&pool).await;

        ScheduleService::create_schedule(&pool, f.school_id, create_dto(&f))
            .await
            .unwrap();

        let schedules = ScheduleService::get_schedules(&pool, f.school_id).await.unwrap();
        assert_eq!(schedules.len(), 1);

        let schedule = &schedules[0];
        assert_eq!(schedule.teacher.as_ref().unwrap().name, "Ada");
        assert_eq!(schedule.subject.as_ref().unwrap().subject_codename, "MTH101");
        assert_eq!(schedule.class.as_ref().unwrap().class_num, 10);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_rejects_bad_references(pool: PgPool) {
        let f = create_fixture(&pool).await;

        let mut dto = create_dto(&f);
        dto.teacher = "not-an-id".to_string();
        let err = ScheduleService::create_schedule(&pool, f.school_id, dto)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid teacher ID");

        let mut dto = create_dto(&f);
        dto.subject = Uuid::new_v4().to_string();
        let err = ScheduleService::create_schedule(&pool, f.school_id, dto)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Subject not found");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_rejects_class_of_other_school(pool: PgPool) {
        let f = create_fixture(&pool).await;
        let other = create_fixture(&pool).await;

        let mut dto = create_dto(&f);
        dto.class_id = other.class_id.to_string();
        let err = ScheduleService::create_schedule(&pool, f.school_id, dto)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Class not found");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_teacher_can_only_update_own_schedule(pool: PgPool) {
        let f = create_fixture(&pool).await;
        let schedule = ScheduleService::create_schedule(&pool, f.school_id, create_dto(&f))
            .await
            .unwrap();

        let later = UpdateScheduleDto {
            start_time: Some(nine_am() + Duration::minutes(30)),
            ..Default::default()
        };

        let err = ScheduleService::update_schedule(
            &pool,
            schedule.id,
            f.school_id,
            Some(Uuid::new_v4()),
            later.clone(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.message(), "Not authorized");

        let updated = ScheduleService::update_schedule(
            &pool,
            schedule.id,
            f.school_id,
            Some(f.teacher_id),
            later,
        )
        .await
        .unwrap();
        assert_eq!(updated.start_time, nine_am() + Duration::minutes(30));
        assert_eq!(updated.end_time, schedule.end_time);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_rejects_inverted_window(pool: PgPool) {
        let f = create_fixture(&pool).await;
        let schedule = ScheduleService::create_schedule(&pool, f.school_id, create_dto(&f))
            .await
            .unwrap();

        let err = ScheduleService::update_schedule(
            &pool,
            schedule.id,
            f.school_id,
            None,
            UpdateScheduleDto {
                start_time: Some(nine_am() + Duration::hours(2)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "End time must be after start time");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_student_sees_schedules_of_class_label(pool: PgPool) {
        let f = create_fixture(&pool).await;
        ScheduleService::create_schedule(&pool, f.school_id, create_dto(&f))
            .await
            .unwrap();

        for label in ["10", "Grade 10"] {
            let student_id = sqlx::query_scalar::<_, Uuid>(
                r#"INSERT INTO students (school_id, email, name, student_class, guardian, student_image, student_image_id, password)
                   VALUES ($1, $2, 'Bart', $3, 'Homer', 'http://img', 'students/x.png', 'hashed')
                   RETURNING id"#,
            )
            .bind(f.school_id)
            .bind(format!("student-{}@test.com", Uuid::new_v4()))
            .bind(label)
            .fetch_one(&pool)
            .await
            .unwrap();

            let schedules = ScheduleService::get_student_schedules(&pool, student_id, f.school_id)
                .await
                .unwrap();
            assert_eq!(schedules.len(), 1, "label {}", label);
        }

        let none = ScheduleService::get_schedules_for_class_label(&pool, f.school_id, "11")
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_is_scoped(pool: PgPool) {
        let f = create_fixture(&pool).await;
        let other = create_fixture(&pool).await;
        let schedule = ScheduleService::create_schedule(&pool, f.school_id, create_dto(&f))
            .await
            .unwrap();

        let err = ScheduleService::delete_schedule(&pool, schedule.id, other.school_id)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        ScheduleService::delete_schedule(&pool, schedule.id, f.school_id)
            .await
            .unwrap();
    }
}
