mod common;

use axum::http::StatusCode;
use common::{
    create_test_school, empty_request, generate_unique_email, multipart_request, read_json,
    setup_test_app, token_for,
};
use schoolhub::schoolhub_auth::Role;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_register_school_without_image(pool: PgPool) {
    let email = generate_unique_email();

    let response = setup_test_app(pool)
        .oneshot(multipart_request(
            "POST",
            "/api/school/register",
            None,
            &[
                ("school_name", None, b"Greenfield High"),
                ("email", None, email.as_bytes()),
                ("owner_name", None, b"Jane Doe"),
                ("password", None, b"secret123"),
            ],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["data"]["school_name"], "Greenfield High");
    assert_eq!(body["data"]["email"], email);
    assert!(body["data"].get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_school_duplicate_email(pool: PgPool) {
    let existing = create_test_school(&pool, "schoolpass").await;

    let response = setup_test_app(pool)
        .oneshot(multipart_request(
            "POST",
            "/api/school/register",
            None,
            &[
                ("school_name", None, b"Copycat High"),
                ("email", None, existing.email.to_uppercase().as_bytes()),
                ("owner_name", None, b"Jane Doe"),
                ("password", None, b"secret123"),
            ],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = read_json(response).await;
    assert_eq!(body["message"], "Email is already registered");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_school_missing_field(pool: PgPool) {
    let response = setup_test_app(pool)
        .oneshot(multipart_request(
            "POST",
            "/api/school/register",
            None,
            &[("school_name", None, b"Greenfield High")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["message"], "email is required");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_public_school_list_hides_contact_details(pool: PgPool) {
    create_test_school(&pool, "schoolpass").await;

    let response = setup_test_app(pool)
        .oneshot(empty_request("GET", "/api/school/all", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let schools = body["data"].as_array().unwrap();
    assert_eq!(schools.len(), 1);
    assert!(schools[0].get("email").is_none());
    assert!(schools[0].get("owner_name").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_school_name(pool: PgPool) {
    let school = create_test_school(&pool, "schoolpass").await;

    let response = setup_test_app(pool)
        .oneshot(multipart_request(
            "PATCH",
            "/api/school/update",
            Some(&token_for(&school, Role::School)),
            &[("school_name", None, b"Renamed Academy")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"]["school_name"], "Renamed Academy");
    assert_eq!(body["data"]["email"], school.email);
}
