//! Classes, subjects and the schedules linking them to teachers.

use std::collections::HashMap;
use std::time::Instant;

use chrono::{Duration, TimeZone, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::models::{ClassSeed, ScheduleSeed, SeededClass, SubjectSeed};
use super::{SeedResult, spread};

const BATCH_SIZE: usize = 500;

const SUBJECTS: [(&str, &str); 10] = [
    ("Mathematics", "MTH"),
    ("English Language", "ENG"),
    ("Biology", "BIO"),
    ("Chemistry", "CHM"),
    ("Physics", "PHY"),
    ("Geography", "GEO"),
    ("History", "HIS"),
    ("Computer Science", "CSC"),
    ("Economics", "ECO"),
    ("Fine Art", "ART"),
];

pub(crate) fn generate_classes(school_ids: &[Uuid], per_school: usize) -> Vec<ClassSeed> {
    spread(school_ids.len(), per_school, |school, i| ClassSeed {
        school_id: school_ids[school],
        class_text: format!("Grade {}", i + 1),
        class_num: (i + 1) as i32,
    })
}

pub(crate) fn generate_subjects(school_ids: &[Uuid], per_school: usize) -> Vec<SubjectSeed> {
    spread(school_ids.len(), per_school, |school, i| {
        let (name, code) = SUBJECTS[i % SUBJECTS.len()];
        let round = i / SUBJECTS.len();
        SubjectSeed {
            school_id: school_ids[school],
            subject_name: if round == 0 {
                name.to_string()
            } else {
                format!("{} {}", name, round + 1)
            },
            subject_codename: format!("{}{}", code, 101 + round * 100),
        }
    })
}

pub(crate) async fn seed_classes(
    db: &PgPool,
    school_ids: &[Uuid],
    per_school: usize,
) -> SeedResult<Vec<SeededClass>> {
    let start_time = Instant::now();
    println!("🏫 Seeding {} classes...", school_ids.len() * per_school);

    let classes = generate_classes(school_ids, per_school);
    let mut tx = db.begin().await?;
    let mut seeded = Vec::with_capacity(classes.len());

    for chunk in classes.chunks(BATCH_SIZE) {
        let mut builder =
            QueryBuilder::<Postgres>::new("INSERT INTO classes (school_id, class_text, class_num) ");
        builder.push_values(chunk, |mut row, class| {
            row.push_bind(class.school_id)
                .push_bind(&class.class_text)
                .push_bind(class.class_num);
        });
        builder.push(" RETURNING id, school_id, class_num");

        let rows: Vec<(Uuid, Uuid, i32)> = builder.build_query_as().fetch_all(&mut *tx).await?;
        seeded.extend(rows.into_iter().map(|(id, school_id, class_num)| SeededClass {
            id,
            school_id,
            class_num,
        }));
    }

    tx.commit().await?;
    println!(
        "   ✓ Inserted {} classes in {:?}",
        seeded.len(),
        start_time.elapsed()
    );
    Ok(seeded)
}

/// Returns `(subject_id, school_id)` pairs.
pub(crate) async fn seed_subjects(
    db: &PgPool,
    school_ids: &[Uuid],
    per_school: usize,
) -> SeedResult<Vec<(Uuid, Uuid)>> {
    let start_time = Instant::now();
    println!("📖 Seeding {} subjects...", school_ids.len() * per_school);

    let subjects = generate_subjects(school_ids, per_school);
    let mut tx = db.begin().await?;
    let mut seeded = Vec::with_capacity(subjects.len());

    for chunk in subjects.chunks(BATCH_SIZE) {
        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO subjects (school_id, subject_name, subject_codename) ",
        );
        builder.push_values(chunk, |mut row, subject| {
            row.push_bind(subject.school_id)
                .push_bind(&subject.subject_name)
                .push_bind(&subject.subject_codename);
        });
        builder.push(" RETURNING id, school_id");

        let rows: Vec<(Uuid, Uuid)> = builder.build_query_as().fetch_all(&mut *tx).await?;
        seeded.extend(rows);
    }

    tx.commit().await?;
    println!(
        "   ✓ Inserted {} subjects in {:?}",
        seeded.len(),
        start_time.elapsed()
    );
    Ok(seeded)
}

fn group_by_school(pairs: &[(Uuid, Uuid)]) -> HashMap<Uuid, Vec<Uuid>> {
    let mut grouped: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for (id, school_id) in pairs {
        grouped.entry(*school_id).or_default().push(*id);
    }
    grouped
}

/// One-hour slots from 08:00 on a fixed Monday, rotating through the
/// school's teachers and subjects.
pub(crate) fn generate_schedules(
    classes: &[SeededClass],
    subjects: &[(Uuid, Uuid)],
    teachers: &[(Uuid, Uuid)],
    per_class: usize,
) -> Vec<ScheduleSeed> {
    let subjects_by_school = group_by_school(subjects);
    let teachers_by_school = group_by_school(teachers);
    let Some(monday) = Utc.with_ymd_and_hms(2025, 1, 6, 8, 0, 0).single() else {
        return Vec::new();
    };

    spread(classes.len(), per_class, |c, slot| {
        let class = &classes[c];
        let subject_ids = subjects_by_school.get(&class.school_id)?;
        let teacher_ids = teachers_by_school.get(&class.school_id)?;
        if subject_ids.is_empty() || teacher_ids.is_empty() {
            return None;
        }
        let start_time = monday + Duration::hours(slot as i64);
        Some(ScheduleSeed {
            school_id: class.school_id,
            teacher_id: teacher_ids[(c + slot) % teacher_ids.len()],
            subject_id: subject_ids[(c * per_class + slot) % subject_ids.len()],
            class_id: class.id,
            start_time,
            end_time: start_time + Duration::minutes(50),
        })
    })
    .into_iter()
    .flatten()
    .collect()
}

pub(crate) async fn seed_schedules(
    db: &PgPool,
    classes: &[SeededClass],
    subjects: &[(Uuid, Uuid)],
    teachers: &[(Uuid, Uuid)],
    per_class: usize,
) -> SeedResult<usize> {
    let start_time = Instant::now();
    let schedules = generate_schedules(classes, subjects, teachers, per_class);
    println!("🗓️  Seeding {} schedules...", schedules.len());

    let mut tx = db.begin().await?;
    let mut inserted = 0;

    for chunk in schedules.chunks(BATCH_SIZE) {
        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO schedules (school_id, teacher_id, subject_id, class_id, start_time, end_time) ",
        );
        builder.push_values(chunk, |mut row, schedule| {
            row.push_bind(schedule.school_id)
                .push_bind(schedule.teacher_id)
                .push_bind(schedule.subject_id)
                .push_bind(schedule.class_id)
                .push_bind(schedule.start_time)
                .push_bind(schedule.end_time);
        });
        inserted += builder.build().execute(&mut *tx).await?.rows_affected() as usize;
    }

    tx.commit().await?;
    println!(
        "   ✓ Inserted {} schedules in {:?}",
        inserted,
        start_time.elapsed()
    );
    Ok(inserted)
}
