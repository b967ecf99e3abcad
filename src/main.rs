use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
    Router,
};
use hiretrack_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware, routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let public_api = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/auth/signup", post(routes::auth::signup))
        .route("/api/auth/login", post(routes::auth::login))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.public_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let app_api = Router::new()
        .route(
            "/api/me",
            get(routes::auth::me).patch(routes::auth::update_me),
        )
        .route(
            "/api/me/profile",
            get(routes::candidates::my_profile).patch(routes::candidates::update_my_profile),
        )
        .route("/api/jobs/active", get(routes::jobs::list_active_jobs))
        .route("/api/jobs/search", get(routes::jobs::search_jobs))
        .route(
            "/api/jobs/convert-currency",
            get(routes::jobs::convert_currency),
        )
        .route("/api/jobs/:id", get(routes::jobs::get_job))
        .route("/api/applications", post(routes::applications::apply))
        .route(
            "/api/applications/mine",
            get(routes::applications::my_applications),
        )
        .route(
            "/api/notifications",
            get(routes::notifications::my_notifications),
        )
        .route(
            "/api/notifications/unread-count",
            get(routes::notifications::unread_count),
        )
        .route(
            "/api/notifications/:id/read",
            post(routes::notifications::mark_read),
        )
        .route(
            "/api/notifications/read-all",
            post(routes::notifications::mark_all_read),
        )
        .route("/api/files/resume", post(routes::files::upload_resume))
        .route(
            "/api/files/profile-image",
            post(routes::files::upload_profile_image),
        )
        .route(
            "/api/master-data/departments",
            get(routes::master_data::list_departments),
        )
        .route(
            "/api/master-data/departments/:department/roles",
            get(routes::master_data::roles_by_department),
        )
        .route("/api/master-data/roles", get(routes::master_data::list_roles))
        .layer(axum::middleware::from_fn(
            middleware::auth::require_bearer_auth,
        ))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.public_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let hr_api = Router::new()
        .route(
            "/api/hr/jobs",
            post(routes::jobs::create_job).get(routes::jobs::list_jobs),
        )
        .route(
            "/api/hr/jobs/:id",
            patch(routes::jobs::update_job).delete(routes::jobs::delete_job),
        )
        .route(
            "/api/hr/jobs/:id/applications",
            get(routes::applications::applications_by_job),
        )
        .route(
            "/api/hr/jobs/:id/matches",
            get(routes::candidates::match_candidates),
        )
        .route(
            "/api/hr/applications",
            get(routes::applications::all_applications),
        )
        .route(
            "/api/hr/applications/:id/status",
            patch(routes::applications::update_application_status),
        )
        .route(
            "/api/hr/applications/:id/interviews",
            get(routes::interviews::interviews_by_application),
        )
        .route("/api/hr/dashboard", get(routes::applications::dashboard_stats))
        .route("/api/hr/candidates", get(routes::candidates::list_candidates))
        .route(
            "/api/hr/interviews",
            post(routes::interviews::create_interview).get(routes::interviews::list_interviews),
        )
        .route(
            "/api/hr/interviews/detailed",
            get(routes::interviews::list_interviews_detailed),
        )
        .route(
            "/api/hr/interviews/:id",
            get(routes::interviews::get_interview)
                .patch(routes::interviews::update_interview)
                .delete(routes::interviews::delete_interview),
        )
        .route(
            "/api/hr/interviews/:id/status",
            patch(routes::interviews::update_interview_status),
        )
        .route(
            "/api/hr/notifications",
            post(routes::notifications::create_notification),
        )
        .route(
            "/api/hr/requisitions",
            post(routes::requisitions::create_requisition)
                .get(routes::requisitions::list_requisitions),
        )
        .route(
            "/api/hr/requisitions/approved",
            get(routes::requisitions::list_approved_requisitions),
        )
        .route(
            "/api/hr/requisitions/:id",
            get(routes::requisitions::get_requisition),
        )
        .route(
            "/api/hr/requisitions/:id/status",
            patch(routes::requisitions::update_requisition_status),
        )
        .route(
            "/api/hr/requisitions/:id/candidates",
            post(routes::requisitions::upload_requisition_candidate)
                .get(routes::requisitions::requisition_candidates),
        )
        .route(
            "/api/hr/requisition-candidates/:id/status",
            patch(routes::requisitions::update_requisition_candidate_status),
        )
        .route(
            "/api/hr/feedback",
            post(routes::feedback::submit_feedback).get(routes::feedback::list_feedback),
        )
        .route(
            "/api/hr/feedback/:id",
            get(routes::feedback::get_feedback)
                .patch(routes::feedback::update_feedback)
                .delete(routes::feedback::delete_feedback),
        )
        .route(
            "/api/hr/feedback/by-interview/:id",
            get(routes::feedback::feedback_by_interview),
        )
        .route(
            "/api/hr/feedback/by-candidate/:id",
            get(routes::feedback::feedback_by_candidate),
        )
        .route(
            "/api/hr/feedback/by-job/:id",
            get(routes::feedback::feedback_by_job),
        )
        .route("/api/hr/master-data/init", post(routes::master_data::initialize))
        .route("/api/hr/files/jd", post(routes::files::upload_jd))
        .route("/api/hr/files/:id", delete(routes::files::delete_file))
        .layer(axum::middleware::from_fn(
            middleware::auth::require_hr_or_admin,
        ))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.hr_rps),
            middleware::rate_limit::rps_middleware,
        ));

    info!("Serving uploads from: {}", config.uploads_dir);

    let app = public_api
        .merge(app_api)
        .merge(hr_api)
        .nest_service(
            "/uploads",
            tower_http::services::ServeDir::new(&config.uploads_dir),
        )
        .with_state(app_state)
        .layer(middleware::cors::permissive_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.max_upload_bytes * 2));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
