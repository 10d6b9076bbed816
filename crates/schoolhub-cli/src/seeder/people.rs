//! Teacher and student accounts.

use std::time::Instant;

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::models::{SeededClass, StudentSeed, TeacherSeed};
use super::{SEED_EMAIL_DOMAIN, SeedResult, spread};

const BATCH_SIZE: usize = 500;
const QUALIFICATIONS: [&str; 4] = ["B.Ed", "B.Sc", "M.Sc", "PhD"];
const GENDERS: [&str; 2] = ["male", "female"];

fn seed_email(first: &str, last: &str) -> String {
    let tag = Uuid::new_v4().simple().to_string();
    format!(
        "{}.{}.{}@{}",
        first.to_lowercase(),
        last.to_lowercase(),
        &tag[..8],
        SEED_EMAIL_DOMAIN
    )
}

fn initial(name: &str) -> char {
    name.chars().next().unwrap_or('X')
}

pub(crate) fn generate_teachers(school_ids: &[Uuid], per_school: usize) -> Vec<TeacherSeed> {
    spread(school_ids.len(), per_school, |school, i| {
        let first: String = FirstName().fake();
        let last: String = LastName().fake();
        TeacherSeed {
            school_id: school_ids[school],
            email: seed_email(&first, &last),
            name: format!("{} {}", first, last),
            qualification: QUALIFICATIONS[i % QUALIFICATIONS.len()].to_string(),
            age: (25..60).fake(),
            gender: GENDERS[i % GENDERS.len()].to_string(),
        }
    })
}

/// Students refer to their class by its number, as a text label.
pub(crate) fn generate_students(classes: &[SeededClass], per_class: usize) -> Vec<StudentSeed> {
    spread(classes.len(), per_class, |c, i| {
        let class = &classes[c];
        let first: String = FirstName().fake();
        let last: String = LastName().fake();
        let image_id = format!("students/seed-{}", Uuid::new_v4());
        StudentSeed {
            school_id: class.school_id,
            email: seed_email(&first, &last),
            name: format!("{} {}", first, last),
            student_class: class.class_num.to_string(),
            age: (6..19).fake(),
            gender: GENDERS[i % GENDERS.len()].to_string(),
            guardian: Name().fake(),
            guardian_phone: PhoneNumber().fake(),
            student_image: format!(
                "https://placehold.co/200x200?text={}{}",
                initial(&first),
                initial(&last)
            ),
            student_image_id: image_id,
        }
    })
}

/// Returns `(teacher_id, school_id)` pairs.
pub(crate) async fn seed_teachers(
    db: &PgPool,
    school_ids: &[Uuid],
    per_school: usize,
    password_hash: &str,
) -> SeedResult<Vec<(Uuid, Uuid)>> {
    let start_time = Instant::now();
    println!("👩‍🏫 Seeding {} teachers...", school_ids.len() * per_school);

    let teachers = generate_teachers(school_ids, per_school);
    let mut tx = db.begin().await?;
    let mut seeded = Vec::with_capacity(teachers.len());

    for chunk in teachers.chunks(BATCH_SIZE) {
        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO teachers (school_id, email, name, qualification, age, gender, password) ",
        );
        builder.push_values(chunk, |mut row, teacher| {
            row.push_bind(teacher.school_id)
                .push_bind(&teacher.email)
                .push_bind(&teacher.name)
                .push_bind(&teacher.qualification)
                .push_bind(teacher.age)
                .push_bind(&teacher.gender)
                .push_bind(password_hash);
        });
        builder.push(" RETURNING id, school_id");

        let rows: Vec<(Uuid, Uuid)> = builder.build_query_as().fetch_all(&mut *tx).await?;
        seeded.extend(rows);
    }

    tx.commit().await?;
    println!(
        "   ✓ Inserted {} teachers in {:?}",
        seeded.len(),
        start_time.elapsed()
    );
    Ok(seeded)
}

pub(crate) async fn seed_students(
    db: &PgPool,
    classes: &[SeededClass],
    per_class: usize,
    password_hash: &str,
) -> SeedResult<usize> {
    let start_time = Instant::now();
    println!("🎓 Seeding {} students...", classes.len() * per_class);

    let students = generate_students(classes, per_class);
    let mut tx = db.begin().await?;
    let mut inserted = 0;

    for chunk in students.chunks(BATCH_SIZE) {
        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO students (school_id, email, name, student_class, age, gender, guardian, \
             guardian_phone, student_image, student_image_id, password) ",
        );
        builder.push_values(chunk, |mut row, student| {
            row.push_bind(student.school_id)
                .push_bind(&student.email)
                .push_bind(&student.name)
                .push_bind(&student.student_class)
                .push_bind(student.age)
                .push_bind(&student.gender)
                .push_bind(&student.guardian)
                .push_bind(&student.guardian_phone)
                .push_bind(&student.student_image)
                .push_bind(&student.student_image_id)
                .push_bind(password_hash);
        });
        inserted += builder.build().execute(&mut *tx).await?.rows_affected() as usize;
    }

    tx.commit().await?;
    println!(
        "   ✓ Inserted {} students in {:?}",
        inserted,
        start_time.elapsed()
    );
    Ok(inserted)
}
