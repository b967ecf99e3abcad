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

    let app_api = Router::new()
        .route("/api/applications", post(hiretrack_backend::routes::applications::apply))
        .route(
            "/api/applications/mine",
            get(hiretrack_backend::routes::applications::my_applications),
        )
        .route(
            "/api/me/profile",
            patch(hiretrack_backend::routes::candidates::update_my_profile),
        )
        .route(
            "/api/notifications",
            get(hiretrack_backend::routes::notifications::my_notifications),
        )
        .layer(axum::middleware::from_fn(
            hiretrack_backend::middleware::auth::require_bearer_auth,
        ));

    let hr_api = Router::new()
        .route("/api/hr/jobs", post(hiretrack_backend::routes::jobs::create_job))
        .route(
            "/api/hr/jobs/:id",
            axum::routing::delete(hiretrack_backend::routes::jobs::delete_job),
        )
        .route(
            "/api/hr/jobs/:id/applications",
            get(hiretrack_backend::routes::applications::applications_by_job),
        )
        .route(
            "/api/hr/jobs/:id/matches",
            get(hiretrack_backend::routes::candidates::match_candidates),
        )
        .route(
            "/api/hr/applications/:id/status",
            patch(hiretrack_backend::routes::applications::update_application_status),
        )
        .layer(axum::middleware::from_fn(
            hiretrack_backend::middleware::auth::require_hr_or_admin,
        ));

    let app = public_api.merge(app_api).merge(hr_api).with_state(state);
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

async fn signup(app: &Router, role: &str, name: &str) -> (String, String) {
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({
                "email": format!("{}_{}@example.com", role, Uuid::new_v4()),
                "password": "super-secret-pw",
                "name": name,
                "role": role
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
async fn application_lifecycle_end_to_end() {
    let Some((app, pool)) = setup_app().await else { return };

    let (hr_id, hr_token) = signup(&app, "hr", "Hiring Manager").await;
    let (cand_id, cand_token) = signup(&app, "candidate", "Eager Applicant").await;

    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/hr/jobs",
            Some(&hr_token),
            Some(json!({
                "title": "Backend Engineer",
                "description": "Own the hiring pipeline services.",
                "department": "Engineering",
                "experience_required": 4.0,
                "salary_min": "1200000",
                "salary_max": "2400000",
                "location": "Bengaluru",
                "required_skills": ["Rust", "PostgreSQL"]
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let job = body_json(resp).await;
    let job_id = job["id"].as_str().unwrap().to_string();
    assert_eq!(job["status"], "active");
    assert_eq!(job["currency"], "INR");

    // Posting fans a job_posted notification out to every candidate profile.
    let notified: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM notifications WHERE user_id = $1::uuid AND type = 'job_posted' AND related_id = $2",
    )
    .bind(&cand_id)
    .bind(&job_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(notified, 1);

    // Candidates can apply; HR tokens cannot.
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/applications",
            Some(&hr_token),
            Some(json!({ "job_id": job_id })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/applications",
            Some(&cand_token),
            Some(json!({ "job_id": job_id, "cover_letter": "I build ATS backends." })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let application = body_json(resp).await;
    let application_id = application["id"].as_str().unwrap().to_string();
    assert_eq!(application["status"], "applied");

    // The poster hears about the new application.
    let poster_notified: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM notifications WHERE user_id = $1::uuid AND title = 'New Job Application' AND related_id = $2",
    )
    .bind(&hr_id)
    .bind(&application_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(poster_notified, 1);

    // Second apply for the same pair is rejected.
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/applications",
            Some(&cand_token),
            Some(json!({ "job_id": job_id })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "You have already applied to this job");

    let resp = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/hr/jobs/{}/applications", job_id),
            Some(&hr_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let listed = body_json(resp).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["candidate_name"], "Eager Applicant");

    // Selecting the candidate inserts exactly one congratulation.
    let resp = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/api/hr/applications/{}/status", application_id),
            Some(&hr_token),
            Some(json!({ "status": "selected", "review_notes": "Strong systems background" })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["status"], "selected");
    assert_eq!(updated["reviewed_by"].as_str().unwrap(), hr_id);

    let congrats: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM notifications WHERE user_id = $1::uuid AND related_id = $2 AND title LIKE '%Congratulations%'",
    )
    .bind(&cand_id)
    .bind(&application_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(congrats, 1);

    // Deleting the job takes its applications with it and reports the count.
    let resp = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/hr/jobs/{}", job_id),
            Some(&hr_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted = body_json(resp).await;
    assert_eq!(deleted["success"], true);
    assert_eq!(deleted["deleted_applications"], 1);

    let orphans: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE job_id = $1::uuid")
            .bind(&job_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(orphans, 0);
}

#[tokio::test]
async fn matching_ranks_and_caps_results() {
    let Some((app, _pool)) = setup_app().await else { return };

    let (_hr_id, hr_token) = signup(&app, "hr", "Matcher HR").await;
    let (cand_id, cand_token) = signup(&app, "candidate", "Half Match").await;

    // Unique marker skill keeps this run's scoring independent of leftovers.
    let marker = format!("skill-{}", Uuid::new_v4());

    let resp = app
        .clone()
        .oneshot(request(
            "PATCH",
            "/api/me/profile",
            Some(&cand_token),
            Some(json!({
                "skills": [marker.clone(), "python"],
                "experience_years": 2.0,
                "education": "B.Tech",
                "location": "Pune"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/hr/jobs",
            Some(&hr_token),
            Some(json!({
                "title": "Matching Target",
                "description": "Scored against the marker skill.",
                "department": "Engineering",
                "experience_required": 4.0,
                "salary_min": "100000",
                "salary_max": "200000",
                "location": "Remote",
                "required_skills": [marker, "Node.js"]
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let job = body_json(resp).await;
    let job_id = job["id"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/hr/jobs/{}/matches", job_id),
            Some(&hr_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let matches = body_json(resp).await;
    let matches = matches.as_array().unwrap();

    assert!(matches.len() <= 10);
    let scores: Vec<i64> = matches
        .iter()
        .map(|m| m["match_percentage"].as_i64().unwrap())
        .collect();
    assert!(scores.iter().all(|s| *s > 20));
    assert!(scores.windows(2).all(|w| w[0] >= w[1]), "not sorted: {:?}", scores);

    // 50% skill overlap and 2/4 years → exactly 50 for our candidate.
    let ours = matches
        .iter()
        .find(|m| m["user_id"].as_str() == Some(cand_id.as_str()));
    if let Some(ours) = ours {
        assert_eq!(ours["match_percentage"], 50);
    }
}
