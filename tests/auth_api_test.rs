use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::post,
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use uuid::Uuid;

async fn setup_app() -> Option<(Router, sqlx::PgPool)> {
    dotenvy::dotenv().ok();
    if env::var("DATABASE_URL").is_err() {
        eprintln!("skipping: DATABASE_URL not set");
        return None;
    }
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("PUBLIC_RPS", "100");
    env::set_var("HR_RPS", "100");

    let _ = hiretrack_backend::config::init_config();
    let pool = hiretrack_backend::database::pool::create_pool()
        .await
        .expect("pool");
    sqlx::migrate!("./migrations").run(&pool).await.expect("migrations");

    let state = hiretrack_backend::AppState::new(pool.clone());
    let app = Router::new()
        .route("/api/auth/signup", post(hiretrack_backend::routes::auth::signup))
        .route("/api/auth/login", post(hiretrack_backend::routes::auth::login))
        .with_state(state);

    Some((app, pool))
}

fn json_request(uri: &str, body: JsonValue) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn signup_then_login_roundtrip() {
    let Some((app, pool)) = setup_app().await else { return };

    let email = format!("cand_{}@example.com", Uuid::new_v4());
    let resp = app
        .clone()
        .oneshot(json_request(
            "/api/auth/signup",
            json!({
                "email": email,
                "password": "super-secret-pw",
                "name": "Asha Verma",
                "role": "candidate",
                "phone": "+91 98765 43210"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["role"], "candidate");
    let user_id = body["user"]["id"].as_str().unwrap().to_string();

    // Candidate signups get an empty profile in the same transaction.
    let profile_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM candidate_profiles WHERE user_id = $1::uuid",
    )
    .bind(&user_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(profile_count, 1);

    // Stored credential is a hash, never the plaintext.
    let stored: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1::uuid")
        .bind(&user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_ne!(stored, "super-secret-pw");
    assert!(stored.starts_with("$argon2"));

    let resp = app
        .clone()
        .oneshot(json_request(
            "/api/auth/login",
            json!({ "email": email, "password": "super-secret-pw" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(json_request(
            "/api/auth/login",
            json!({ "email": email, "password": "wrong-password" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let Some((app, _pool)) = setup_app().await else { return };

    let email = format!("dup_{}@example.com", Uuid::new_v4());
    let payload = json!({
        "email": email,
        "password": "super-secret-pw",
        "name": "First In",
        "role": "hr"
    });

    let resp = app
        .clone()
        .oneshot(json_request("/api/auth/signup", payload.clone()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(json_request("/api/auth/signup", payload))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "User with this email already exists");
}

#[tokio::test]
async fn at_most_one_admin_account() {
    let Some((app, _pool)) = setup_app().await else { return };

    let first = app
        .clone()
        .oneshot(json_request(
            "/api/auth/signup",
            json!({
                "email": format!("admin_{}@example.com", Uuid::new_v4()),
                "password": "super-secret-pw",
                "name": "Admin One",
                "role": "admin"
            }),
        ))
        .await
        .unwrap();
    // A prior run may already hold the admin slot.
    assert!(
        first.status() == StatusCode::CREATED || first.status() == StatusCode::CONFLICT,
        "unexpected status {}",
        first.status()
    );

    let second = app
        .clone()
        .oneshot(json_request(
            "/api/auth/signup",
            json!({
                "email": format!("admin_{}@example.com", Uuid::new_v4()),
                "password": "super-secret-pw",
                "name": "Admin Two",
                "role": "admin"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = body_json(second).await;
    assert_eq!(
        body["error"],
        "An admin account already exists. Only one admin is allowed."
    );
}

#[tokio::test]
async fn weak_password_is_rejected() {
    let Some((app, _pool)) = setup_app().await else { return };

    let resp = app
        .clone()
        .oneshot(json_request(
            "/api/auth/signup",
            json!({
                "email": format!("weak_{}@example.com", Uuid::new_v4()),
                "password": "short",
                "name": "Weak Password",
                "role": "candidate"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
