use std::time::Instant;

use chrono::{Duration, Utc};
use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence};
use schoolhub_models::Audience;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::models::NoticeSeed;
use super::{SeedResult, spread};

const BATCH_SIZE: usize = 500;

fn audience_for(i: usize) -> Vec<Audience> {
    match i % 4 {
        0 => vec![Audience::Website],
        1 => vec![Audience::Teacher],
        2 => vec![Audience::Student],
        _ => vec![Audience::Teacher, Audience::Student],
    }
}

pub(crate) fn generate_notices(school_ids: &[Uuid], per_school: usize) -> Vec<NoticeSeed> {
    let now = Utc::now();
    spread(school_ids.len(), per_school, |school, i| NoticeSeed {
        school_id: school_ids[school],
        title: Sentence(2..5).fake(),
        message: Paragraph(1..3).fake(),
        date: now + Duration::days((i as i64) * 3),
        audience: audience_for(i),
    })
}

pub(crate) async fn seed_notices(
    db: &PgPool,
    school_ids: &[Uuid],
    per_school: usize,
) -> SeedResult<usize> {
    let start_time = Instant::now();
    println!("📢 Seeding {} notices...", school_ids.len() * per_school);

    let notices = generate_notices(school_ids, per_school);
    let mut tx = db.begin().await?;
    let mut inserted = 0;

    for chunk in notices.chunks(BATCH_SIZE) {
        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO notices (school_id, title, message, date, audience) ",
        );
        builder.push_values(chunk, |mut row, notice| {
            row.push_bind(notice.school_id)
                .push_bind(&notice.title)
                .push_bind(&notice.message)
                .push_bind(notice.date)
                .push_bind(&notice.audience);
        });
        inserted += builder.build().execute(&mut *tx).await?.rows_affected() as usize;
    }

    tx.commit().await?;
    println!(
        "   ✓ Inserted {} notices in {:?}",
        inserted,
        start_time.elapsed()
    );
    Ok(inserted)
}
