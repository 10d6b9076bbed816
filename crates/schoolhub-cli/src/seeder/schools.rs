use std::time::Instant;

use fake::Fake;
use fake::faker::address::en::CityName;
use fake::faker::name::en::Name;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::models::SchoolSeed;
use super::{SEED_EMAIL_DOMAIN, SeedResult, spread};

const BATCH_SIZE: usize = 500;

pub(crate) fn generate_schools(count: usize) -> Vec<SchoolSeed> {
    spread(count, 1, |idx, _| {
        let city: String = CityName().fake();
        let tag = Uuid::new_v4().simple().to_string();
        SchoolSeed {
            school_name: format!("{} High School", city),
            owner_name: Name().fake(),
            email: format!("school{}-{}@{}", idx, &tag[..8], SEED_EMAIL_DOMAIN),
        }
    })
}

pub(crate) async fn seed_schools(
    db: &PgPool,
    count: usize,
    password_hash: &str,
) -> SeedResult<Vec<Uuid>> {
    let start_time = Instant::now();
    println!("\n📚 Seeding {} schools...", count);

    let schools = generate_schools(count);
    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(schools.len());

    for chunk in schools.chunks(BATCH_SIZE) {
        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO schools (school_name, owner_name, email, password) ",
        );
        builder.push_values(chunk, |mut row, school| {
            row.push_bind(&school.school_name)
                .push_bind(&school.owner_name)
                .push_bind(&school.email)
                .push_bind(password_hash);
        });
        builder.push(" RETURNING id");

        let chunk_ids: Vec<Uuid> = builder.build_query_scalar().fetch_all(&mut *tx).await?;
        ids.extend(chunk_ids);
    }

    tx.commit().await?;
    println!(
        "   ✓ Inserted {} schools in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}
