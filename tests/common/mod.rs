use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use schoolhub::router::init_router;
use schoolhub::schoolhub_auth::{Role, TokenSubject, issue_token};
use schoolhub::schoolhub_config::{CorsConfig, JwtConfig, StorageConfig};
use schoolhub::schoolhub_core::hash_password_blocking;
use schoolhub::state::AppState;
use sqlx::PgPool;
use uuid::Uuid;

pub const BOUNDARY: &str = "schoolhub-test-boundary";

#[allow(dead_code)]
pub struct TestAccount {
    pub id: Uuid,
    pub school_id: Uuid,
    pub email: String,
    pub password: String,
    pub name: String,
}

#[allow(dead_code)]
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".to_string(),
        expiry: 3600,
        uniform_login_errors: false,
    }
}

#[allow(dead_code)]
pub fn test_storage_config() -> StorageConfig {
    StorageConfig {
        asset_dir: std::env::temp_dir().join(format!("schoolhub-test-{}", Uuid::new_v4())),
        base_url: "http://localhost:3000/files".to_string(),
        max_bytes: 1024 * 1024,
    }
}

#[allow(dead_code)]
pub fn setup_test_app(pool: PgPool) -> axum::Router {
    let state = AppState::new(
        pool,
        test_jwt_config(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        test_storage_config(),
    );
    init_router(state)
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn token_for(account: &TestAccount, role: Role) -> String {
    issue_token(
        &TokenSubject {
            id: account.id,
            school_id: account.school_id,
            role,
            name: &account.name,
            image_url: None,
        },
        &test_jwt_config(),
    )
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_school(pool: &PgPool, password: &str) -> TestAccount {
    let email = generate_unique_email();
    let hashed = hash_password_blocking(password).unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO schools (school_name, owner_name, email, password)
        VALUES ('Test School', 'Test Owner', $1, $2)
        RETURNING id
        "#,
    )
    .bind(&email)
    .bind(hashed)
    .fetch_one(pool)
    .await
    .unwrap();

    TestAccount {
        id,
        school_id: id,
        email,
        password: password.to_string(),
        name: "Test School".to_string(),
    }
}

#[allow(dead_code)]
pub async fn create_test_teacher(pool: &PgPool, school_id: Uuid, password: &str) -> TestAccount {
    let email = generate_unique_email();
    let hashed = hash_password_blocking(password).unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO teachers (school_id, email, name, qualification, password)
        VALUES ($1, $2, 'Test Teacher', 'BSc', $3)
        RETURNING id
        "#,
    )
    .bind(school_id)
    .bind(&email)
    .bind(hashed)
    .fetch_one(pool)
    .await
    .unwrap();

    TestAccount {
        id,
        school_id,
        email,
        password: password.to_string(),
        name: "Test Teacher".to_string(),
    }
}

#[allow(dead_code)]
pub async fn create_test_student(
    pool: &PgPool,
    school_id: Uuid,
    student_class: Option<&str>,
) -> TestAccount {
    let email = generate_unique_email();
    let password = "studentpass";
    let hashed = hash_password_blocking(password).unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO students (school_id, email, name, student_class, guardian,
                              student_image, student_image_id, password)
        VALUES ($1, $2, 'Test Student', $3, 'Guardian', 'http://img/test.png', 'students/test.png', $4)
        RETURNING id
        "#,
    )
    .bind(school_id)
    .bind(&email)
    .bind(student_class)
    .bind(hashed)
    .fetch_one(pool)
    .await
    .unwrap();

    TestAccount {
        id,
        school_id,
        email,
        password: password.to_string(),
        name: "Test Student".to_string(),
    }
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// A multipart part: name, optional (file name, content type), and bytes.
#[allow(dead_code)]
pub type Part<'a> = (&'a str, Option<(&'a str, &'a str)>, &'a [u8]);

#[allow(dead_code)]
pub fn multipart_request(method: &str, uri: &str, token: Option<&str>, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, file, bytes) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match file {
            Some((file_name, content_type)) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, file_name, content_type
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
            }
        }
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    let mut builder = Request::builder().method(method).uri(uri).header(
        "content-type",
        format!("multipart/form-data; boundary={}", BOUNDARY),
    );
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body)).unwrap()
}

#[allow(dead_code)]
pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
