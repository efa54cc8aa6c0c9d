mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use course_store_api::{
    entity::{purchases, users},
    services::auth_service::hash_password,
};

use common::{
    RecordingGateway, course_model, now, order_model, purchase_model, request, send, test_app,
    token_for, transaction_log,
};

fn account(role: &str, password: &str) -> users::Model {
    users::Model {
        id: Uuid::new_v4(),
        first_name: "Asha".into(),
        last_name: "Sharma".into(),
        email: "asha@example.com".into(),
        password_hash: hash_password(password).unwrap(),
        role: role.into(),
        newsletter: false,
        dark_mode: true,
        created_at: now(),
        updated_at: now(),
    }
}

#[tokio::test]
async fn login_returns_token_and_sets_session_cookie() {
    let user = account("user", "secret123");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user.clone()]])
        .into_connection();
    let app = test_app(db, Arc::new(RecordingGateway::default()));

    let response = app
        .oneshot(request(
            Method::POST,
            "/api/v1/user/login",
            None,
            Some(json!({ "email": "Asha@Example.com", "password": "secret123" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("jwt="));
    assert!(cookie.contains("HttpOnly"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["user"]["_id"], json!(user.id));
    assert_eq!(body["user"]["darkMode"], true);
    assert!(body["user"].get("passwordHash").is_none());
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![account("user", "secret123")]])
        .into_connection();
    let app = test_app(db, Arc::new(RecordingGateway::default()));

    let (status, body) = send(
        app,
        request(
            Method::POST,
            "/api/v1/user/login",
            None,
            Some(json!({ "email": "asha@example.com", "password": "guess" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn admin_login_rejects_regular_accounts() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![account("user", "secret123")]])
        .into_connection();
    let app = test_app(db, Arc::new(RecordingGateway::default()));

    let (status, _) = send(
        app,
        request(
            Method::POST,
            "/api/v1/admin/login",
            None,
            Some(json!({ "email": "asha@example.com", "password": "secret123" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn profile_accepts_session_cookie() {
    let user = account("user", "secret123");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user.clone()]])
        .into_connection();
    let app = test_app(db, Arc::new(RecordingGateway::default()));

    let token = common::token_for(user.id, "user");
    let req = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/user/profile")
        .header(header::COOKIE, format!("theme=dark; jwt={token}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "asha@example.com");
}

#[tokio::test]
async fn profile_without_token_is_unauthorized() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = test_app(db, Arc::new(RecordingGateway::default()));

    let (status, body) = send(app, request(Method::GET, "/api/v1/user/profile", None, None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn logout_expires_cookie() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = test_app(db, Arc::new(RecordingGateway::default()));

    let response = app
        .oneshot(request(Method::GET, "/api/v1/user/logout", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers().get(header::SET_COOKIE).unwrap();
    assert!(cookie.to_str().unwrap().contains("Max-Age=0"));
}

#[tokio::test]
async fn short_signup_password_is_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = test_app(db, Arc::new(RecordingGateway::default()));

    let (status, body) = send(
        app,
        request(
            Method::POST,
            "/api/v1/user/signup",
            None,
            Some(json!({
                "firstName": "Asha",
                "lastName": "Sharma",
                "email": "asha@example.com",
                "password": "123"
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "password must be at least 6 characters long");
}

fn signup_body() -> serde_json::Value {
    json!({
        "firstName": "Asha",
        "lastName": "Sharma",
        "email": "Asha@Example.com",
        "password": "secret123"
    })
}

#[tokio::test]
async fn signup_creates_account() {
    let created = account("user", "secret123");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<users::Model>::new()])
        .append_query_results([vec![created.clone()]])
        .into_connection();
    let app = test_app(db, Arc::new(RecordingGateway::default()));

    let (status, body) = send(
        app,
        request(Method::POST, "/api/v1/user/signup", None, Some(signup_body())),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["_id"], json!(created.id));
    assert_eq!(body["user"]["email"], "asha@example.com");
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn signup_with_taken_email_is_rejected() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![account("user", "secret123")]])
            .into_connection(),
    );
    let app = test_app(db.clone(), Arc::new(RecordingGateway::default()));

    let (status, body) = send(
        app,
        request(Method::POST, "/api/v1/user/signup", None, Some(signup_body())),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email is already taken");
    let log = format!("{:?}", transaction_log(db));
    assert!(!log.contains("INSERT"), "{log}");
}

#[tokio::test]
async fn update_rejects_email_owned_by_someone_else() {
    let me = account("user", "secret123");
    let mut other = account("user", "secret123");
    other.id = Uuid::new_v4();
    other.email = "ravi@example.com".into();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![me.clone()]])
        .append_query_results([vec![other]])
        .into_connection();
    let app = test_app(db, Arc::new(RecordingGateway::default()));

    let token = token_for(me.id, "user");
    let (status, body) = send(
        app,
        request(
            Method::PUT,
            "/api/v1/user/update",
            Some(&token),
            Some(json!({ "email": "Ravi@Example.com" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email is already taken");
}

#[tokio::test]
async fn update_persists_preferences() {
    let me = account("user", "secret123");
    let mut saved = me.clone();
    saved.newsletter = true;
    saved.dark_mode = false;

    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![me.clone()]])
            .append_query_results([vec![saved]])
            .into_connection(),
    );
    let app = test_app(db.clone(), Arc::new(RecordingGateway::default()));

    let token = token_for(me.id, "user");
    let (status, body) = send(
        app,
        request(
            Method::PUT,
            "/api/v1/user/update",
            Some(&token),
            Some(json!({ "preferences": { "newsletter": true, "darkMode": false } })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["newsletter"], true);
    assert_eq!(body["user"]["darkMode"], false);

    let log = format!("{:?}", transaction_log(db));
    assert!(log.contains(r#"UPDATE "users""#), "{log}");
    assert!(log.contains(r#""newsletter""#), "{log}");
    assert!(log.contains(r#""dark_mode""#), "{log}");
}

#[tokio::test]
async fn purchases_lists_records_and_courses() {
    let user_id = Uuid::new_v4();
    let course = course_model("Rust from Scratch", 499.0, Uuid::new_v4());
    let order = order_model(user_id, course.id, "pi_3PqLm2", 499.0);
    let purchase = purchase_model(&order);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![purchase.clone()]])
        .append_query_results([vec![course.clone()]])
        .into_connection();
    let app = test_app(db, Arc::new(RecordingGateway::default()));

    let token = token_for(user_id, "user");
    let (status, body) = send(
        app,
        request(Method::GET, "/api/v1/user/purchases", Some(&token), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let purchased = body["purchased"].as_array().unwrap();
    assert_eq!(purchased.len(), 1);
    assert_eq!(purchased[0]["orderId"], json!(order.id));
    assert_eq!(body["courses"][0]["_id"], json!(course.id));
}

#[tokio::test]
async fn purchases_without_records_skips_course_lookup() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<purchases::Model>::new()])
            .into_connection(),
    );
    let app = test_app(db.clone(), Arc::new(RecordingGateway::default()));

    let token = token_for(Uuid::new_v4(), "user");
    let (status, body) = send(
        app,
        request(Method::GET, "/api/v1/user/purchases", Some(&token), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["purchased"], json!([]));
    assert_eq!(body["courses"], json!([]));
    assert_eq!(transaction_log(db).len(), 1);
}
