//! Fake data for development databases.
//!
//! Every seeded school uses an email under [`SEED_EMAIL_DOMAIN`], which is
//! how [`clear_all`] finds them again. Deleting a school cascades to all of
//! its records.

mod academics;
mod models;
mod notices;
mod people;
mod schools;

use std::time::Instant;

use rayon::prelude::*;
use schoolhub_core::hash_password_blocking;
use sqlx::PgPool;
use uuid::Uuid;

pub use models::{SchoolCreds, SeedConfig, SeedSummary};

pub const SEED_EMAIL_DOMAIN: &str = "seed.schoolhub.test";
pub const SEED_PASSWORD: &str = "password123";

pub type SeedResult<T> = Result<T, Box<dyn std::error::Error>>;

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> SeedResult<SeedSummary> {
    let total_start = Instant::now();
    println!("🌱 Starting database seeding...");
    println!("   - Schools: {}", config.schools);
    println!(
        "   - Per school: {} classes, {} subjects, {} teachers, {} notices",
        config.classes_per_school,
        config.subjects_per_school,
        config.teachers_per_school,
        config.notices_per_school
    );
    println!(
        "   - Per class: {} students, {} schedules",
        config.students_per_class, config.schedules_per_class
    );

    println!("\n🔐 Hashing password...");
    let hash_start = Instant::now();
    let password_hash = hash_password_blocking(SEED_PASSWORD).map_err(|e| e.message())?;
    println!("   ✓ Hashed password in {:?}", hash_start.elapsed());

    let school_ids = schools::seed_schools(db, config.schools, &password_hash).await?;

    let mut summary = SeedSummary {
        schools: school_ids.len(),
        ..Default::default()
    };

    let classes = academics::seed_classes(db, &school_ids, config.classes_per_school).await?;
    let subjects = academics::seed_subjects(db, &school_ids, config.subjects_per_school).await?;
    let teachers =
        people::seed_teachers(db, &school_ids, config.teachers_per_school, &password_hash).await?;
    summary.classes = classes.len();
    summary.subjects = subjects.len();
    summary.teachers = teachers.len();

    summary.students =
        people::seed_students(db, &classes, config.students_per_class, &password_hash).await?;
    summary.schedules = academics::seed_schedules(
        db,
        &classes,
        &subjects,
        &teachers,
        config.schedules_per_class,
    )
    .await?;
    summary.notices = notices::seed_notices(db, &school_ids, config.notices_per_school).await?;

    println!(
        "\n✅ Seeding complete in {:?}: {} schools, {} classes, {} subjects, {} teachers, {} students, {} schedules, {} notices",
        total_start.elapsed(),
        summary.schools,
        summary.classes,
        summary.subjects,
        summary.teachers,
        summary.students,
        summary.schedules,
        summary.notices
    );
    println!("\n📝 Default password for all accounts: {}", SEED_PASSWORD);

    Ok(summary)
}

/// Removes every seeded school and, through cascades, everything it owns.
pub async fn clear_all(db: &PgPool) -> SeedResult<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded data...");

    let deleted = sqlx::query("DELETE FROM schools WHERE email LIKE $1")
        .bind(format!("%@{}", SEED_EMAIL_DOMAIN))
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} seeded schools in {:?}",
        deleted,
        start_time.elapsed()
    );
    println!("✅ Seeded data cleared successfully!");

    Ok(deleted)
}

/// Inserts a single school account. Returns `None` when the email is taken.
pub async fn create_school(db: &PgPool, creds: &SchoolCreds) -> SeedResult<Option<Uuid>> {
    let hashed = hash_password_blocking(&creds.password).map_err(|e| e.message())?;

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO schools (school_name, owner_name, email, password)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT DO NOTHING
         RETURNING id",
    )
    .bind(&creds.school_name)
    .bind(&creds.owner_name)
    .bind(creds.email.trim().to_lowercase())
    .bind(&hashed)
    .fetch_optional(db)
    .await?;

    Ok(id)
}

/// Builds `per_owner` items for each of `owners` in parallel, passing
/// `(owner_index, item_index)` to `make`.
pub(crate) fn spread<T, F>(owners: usize, per_owner: usize, make: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize, usize) -> T + Sync + Send,
{
    if per_owner == 0 {
        return Vec::new();
    }
    (0..owners * per_owner)
        .into_par_iter()
        .map(|n| make(n / per_owner, n % per_owner))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spread_covers_every_pair() {
        let pairs = spread(3, 2, |owner, i| (owner, i));
        assert_eq!(pairs.len(), 6);
        assert!(pairs.contains(&(2, 1)));
        assert!(pairs.contains(&(0, 0)));
    }
}
