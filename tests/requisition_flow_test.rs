use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::{get, patch, post},
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

    let public_api = Router::new()
        .route("/api/auth/signup", post(hiretrack_backend::routes::auth::signup));

    let hr_api = Router::new()
        .route(
            "/api/hr/requisitions",
            post(hiretrack_backend::routes::requisitions::create_requisition)
                .get(hiretrack_backend::routes::requisitions::list_requisitions),
        )
        .route(
            "/api/hr/requisitions/approved",
            get(hiretrack_backend::routes::requisitions::list_approved_requisitions),
        )
        .route(
            "/api/hr/requisitions/:id/status",
            patch(hiretrack_backend::routes::requisitions::update_requisition_status),
        )
        .route(
            "/api/hr/requisitions/:id/candidates",
            post(hiretrack_backend::routes::requisitions::upload_requisition_candidate)
                .get(hiretrack_backend::routes::requisitions::requisition_candidates),
        )
        .route(
            "/api/hr/requisition-candidates/:id/status",
            patch(hiretrack_backend::routes::requisitions::update_requisition_candidate_status),
        )
        .layer(axum::middleware::from_fn(
            hiretrack_backend::middleware::auth::require_hr_or_admin,
        ));

    let app = public_api.merge(hr_api).with_state(state);
    Some((app, pool))
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<JsonValue>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(resp: axum::response::Response) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn signup_hr(app: &Router, name: &str) -> (String, String) {
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({
                "email": format!("hr_{}@example.com", Uuid::new_v4()),
                "password": "super-secret-pw",
                "name": name,
                "role": "hr"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    (
        body["user"]["id"].as_str().unwrap().to_string(),
        body["token"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn requisition_approval_pipeline() {
    let Some((app, pool)) = setup_app().await else { return };

    let (creator_id, creator_token) = signup_hr(&app, "Req Creator").await;
    let (approver_id, approver_token) = signup_hr(&app, "Req Approver").await;

    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/hr/requisitions",
            Some(&creator_token),
            Some(json!({
                "department": "Engineering",
                "job_role": "Backend Developer",
                "experience_required": 3.0,
                "number_of_positions": 2,
                "skills_required": ["Rust", "SQL"],
                "description": "Platform team backfill"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let requisition = body_json(resp).await;
    let requisition_id = requisition["id"].as_str().unwrap().to_string();
    assert_eq!(requisition["status"], "pending");

    // Creation fans out to every hr/admin user, the approver included.
    let notified: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM notifications WHERE user_id = $1::uuid AND title = 'New Requisition Created' AND related_id = $2",
    )
    .bind(&approver_id)
    .bind(&requisition_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(notified, 1);

    let upload_payload = json!({
        "name": "Sourced Candidate",
        "email": "sourced@example.com",
        "skills": ["Rust"],
        "experience_years": 4.0,
        "resume_id": "feedcafe.pdf"
    });

    // Uploads are rejected until the requisition is approved.
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/hr/requisitions/{}/candidates", requisition_id),
            Some(&creator_token),
            Some(upload_payload.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/api/hr/requisitions/{}/status", requisition_id),
            Some(&approver_token),
            Some(json!({ "status": "approved" })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let approved = body_json(resp).await;
    assert_eq!(approved["status"], "approved");
    assert_eq!(approved["approved_by"].as_str().unwrap(), approver_id);
    assert!(approved["approved_at"].is_string());

    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/hr/requisitions/{}/candidates", requisition_id),
            Some(&approver_token),
            Some(upload_payload),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let candidate = body_json(resp).await;
    let candidate_id = candidate["id"].as_str().unwrap().to_string();
    assert_eq!(candidate["status"], "submitted");

    // The requisition creator hears about the upload.
    let creator_notified: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM notifications WHERE user_id = $1::uuid AND title = 'New Candidate Uploaded' AND related_id = $2",
    )
    .bind(&creator_id)
    .bind(&candidate_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(creator_notified, 1);

    let resp = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/hr/requisitions/{}/candidates", requisition_id),
            Some(&creator_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let candidates = body_json(resp).await;
    assert_eq!(candidates.as_array().unwrap().len(), 1);
    assert_eq!(candidates[0]["uploader_name"], "Req Approver");

    let resp = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/api/hr/requisition-candidates/{}/status", candidate_id),
            Some(&creator_token),
            Some(json!({ "status": "shortlisted" })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let reviewed = body_json(resp).await;
    assert_eq!(reviewed["status"], "shortlisted");
    assert_eq!(reviewed["reviewed_by"].as_str().unwrap(), creator_id);

    // The approved listing carries the upload tally.
    let resp = app
        .clone()
        .oneshot(request(
            "GET",
            "/api/hr/requisitions/approved",
            Some(&creator_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let listed = body_json(resp).await;
    let ours = listed
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"].as_str() == Some(requisition_id.as_str()))
        .expect("approved requisition listed");
    assert_eq!(ours["candidates_count"], 1);
    assert_eq!(ours["creator_name"], "Req Creator");

    // Closed is reachable from approved and keeps the approval stamp.
    let resp = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/api/hr/requisitions/{}/status", requisition_id),
            Some(&creator_token),
            Some(json!({ "status": "closed" })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let closed = body_json(resp).await;
    assert_eq!(closed["status"], "closed");
    assert_eq!(closed["approved_by"].as_str().unwrap(), approver_id);
}
