mod common;

use axum::http::StatusCode;
use common::{
    create_test_school, create_test_student, create_test_teacher, empty_request, json_request,
    read_json, setup_test_app, token_for,
};
use schoolhub::schoolhub_auth::Role;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

async fn create_class(app: axum::Router, token: &str, class_text: &str, class_num: i32) -> String {
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/class/create",
            Some(token),
            json!({ "class_text": class_text, "class_num": class_num }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    body["data"]["id"].as_str().unwrap().to_string()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_classes_are_isolated_between_schools(pool: PgPool) {
    let school_a = create_test_school(&pool, "schoolpass").await;
    let school_b = create_test_school(&pool, "schoolpass").await;
    let token_a = token_for(&school_a, Role::School);
    let token_b = token_for(&school_b, Role::School);

    create_class(setup_test_app(pool.clone()), &token_a, "Grade 10", 10).await;

    let response = setup_test_app(pool.clone())
        .oneshot(empty_request("GET", "/api/class/all", Some(&token_b)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    let response = setup_test_app(pool)
        .oneshot(empty_request("GET", "/api/class/all", Some(&token_a)))
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["class_text"], "Grade 10");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_other_school_cannot_delete_class(pool: PgPool) {
    let school_a = create_test_school(&pool, "schoolpass").await;
    let school_b = create_test_school(&pool, "schoolpass").await;
    let class_id = create_class(
        setup_test_app(pool.clone()),
        &token_for(&school_a, Role::School),
        "Grade 10",
        10,
    )
    .await;

    let response = setup_test_app(pool)
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/class/delete/{}", class_id),
            Some(&token_for(&school_b, Role::School)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_class_in_use_by_student_cannot_be_deleted(pool: PgPool) {
    let school = create_test_school(&pool, "schoolpass").await;
    let token = token_for(&school, Role::School);
    let class_id = create_class(setup_test_app(pool.clone()), &token, "Grade 10", 10).await;
    let student = create_test_student(&pool, school.id, Some("10")).await;

    let response = setup_test_app(pool.clone())
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/class/delete/{}", class_id),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = read_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "This class is already in use");

    let remaining = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM classes WHERE school_id = $1")
        .bind(school.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 1);

    let response = setup_test_app(pool.clone())
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/student/delete/{}", student.id),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = setup_test_app(pool)
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/class/delete/{}", class_id),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unused_class_is_deleted(pool: PgPool) {
    let school = create_test_school(&pool, "schoolpass").await;
    let token = token_for(&school, Role::School);
    let class_id = create_class(setup_test_app(pool.clone()), &token, "Grade 11", 11).await;

    let response = setup_test_app(pool)
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/class/delete/{}", class_id),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["message"], "Successfully deleted the class");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_can_list_but_not_create_classes(pool: PgPool) {
    let school = create_test_school(&pool, "schoolpass").await;
    let teacher = create_test_teacher(&pool, school.id, "teacherpass").await;
    let token = token_for(&teacher, Role::Teacher);

    let response = setup_test_app(pool.clone())
        .oneshot(empty_request("GET", "/api/class/all", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = setup_test_app(pool)
        .oneshot(json_request(
            "POST",
            "/api/class/create",
            Some(&token),
            json!({ "class_text": "Grade 9", "class_num": 9 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = read_json(response).await;
    assert_eq!(body["message"], "Access Denied");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_cannot_list_classes(pool: PgPool) {
    let school = create_test_school(&pool, "schoolpass").await;
    let student = create_test_student(&pool, school.id, None).await;

    let response = setup_test_app(pool)
        .oneshot(empty_request(
            "GET",
            "/api/class/all",
            Some(&token_for(&student, Role::Student)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_repeated_update_is_idempotent(pool: PgPool) {
    let school = create_test_school(&pool, "schoolpass").await;
    let token = token_for(&school, Role::School);
    let class_id = create_class(setup_test_app(pool.clone()), &token, "Grade 10", 10).await;

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let response = setup_test_app(pool.clone())
            .oneshot(json_request(
                "PATCH",
                &format!("/api/class/update/{}", class_id),
                Some(&token),
                json!({ "class_text": "Grade Ten" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        bodies.push(read_json(response).await);
    }

    assert_eq!(bodies[0]["data"]["class_text"], "Grade Ten");
    assert_eq!(bodies[0]["data"]["class_text"], bodies[1]["data"]["class_text"]);
    assert_eq!(bodies[0]["data"]["class_num"], bodies[1]["data"]["class_num"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_malformed_class_id_is_rejected(pool: PgPool) {
    let school = create_test_school(&pool, "schoolpass").await;

    let response = setup_test_app(pool)
        .oneshot(empty_request(
            "DELETE",
            "/api/class/delete/not-a-uuid",
            Some(&token_for(&school, Role::School)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["message"], "Invalid class ID");
}
