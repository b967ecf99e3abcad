use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::job_dto::{
        ConvertCurrencyQuery, CreateJobPayload, DeleteJobResponse, JobSearchQuery, UpdateJobPayload,
    },
    error::Result,
    middleware::auth::Claims,
    services::job_service,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/hr/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created and candidates notified"),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state
        .job_service
        .create(payload, claims.user_id()?)
        .await?;
    Ok((StatusCode::CREATED, Json(job)))
}

#[utoipa::path(
    get,
    path = "/api/hr/jobs",
    responses(
        (status = 200, description = "All jobs with poster names")
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list_all().await?;
    Ok(Json(jobs))
}

#[utoipa::path(
    get,
    path = "/api/jobs/active",
    responses(
        (status = 200, description = "Active jobs, newest first")
    )
)]
#[axum::debug_handler]
pub async fn list_active_jobs(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list_active().await?;
    Ok(Json(jobs))
}

#[utoipa::path(
    get,
    path = "/api/jobs/search",
    params(
        ("q" = Option<String>, Query, description = "Free-text query"),
        ("location" = Option<String>, Query, description = "Location substring"),
        ("experience_level" = Option<String>, Query, description = "fresher | junior | mid | senior"),
        ("skills" = Option<String>, Query, description = "Comma-separated skills")
    ),
    responses(
        (status = 200, description = "Matching active jobs")
    )
)]
#[axum::debug_handler]
pub async fn search_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobSearchQuery>,
) -> Result<impl IntoResponse> {
    let jobs = state.job_service.search(query).await?;
    Ok(Json(jobs))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job with poster name"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_by_id(id).await?;
    Ok(Json(job))
}

#[utoipa::path(
    patch,
    path = "/api/hr/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Job updated"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.update(id, payload).await?;
    Ok(Json(job))
}

#[utoipa::path(
    delete,
    path = "/api/hr/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job and its applications deleted"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let deleted_applications = state.job_service.delete(id).await?;
    Ok(Json(DeleteJobResponse {
        success: true,
        deleted_applications,
    }))
}

#[axum::debug_handler]
pub async fn convert_currency(
    Query(query): Query<ConvertCurrencyQuery>,
) -> Result<impl IntoResponse> {
    Ok(Json(job_service::convert_currency(
        query.amount,
        &query.from,
        &query.to,
    )))
}
