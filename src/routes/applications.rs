use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::application_dto::{ApplyPayload, UpdateApplicationStatusPayload},
    error::{Error, Result},
    middleware::auth::Claims,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = ApplyPayload,
    responses(
        (status = 201, description = "Application filed"),
        (status = 409, description = "Already applied to this job")
    )
)]
#[axum::debug_handler]
pub async fn apply(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ApplyPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let role = claims.role.clone().unwrap_or_default();
    if !role.eq_ignore_ascii_case("candidate") {
        return Err(Error::Forbidden(
            "Only candidates can apply to jobs".to_string(),
        ));
    }

    let application = state
        .application_service
        .apply(claims.user_id()?, payload.job_id, payload.cover_letter)
        .await?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[axum::debug_handler]
pub async fn my_applications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let applications = state
        .application_service
        .list_by_candidate(claims.user_id()?)
        .await?;
    Ok(Json(applications))
}

#[axum::debug_handler]
pub async fn applications_by_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let applications = state.application_service.list_by_job(job_id).await?;
    Ok(Json(applications))
}

#[axum::debug_handler]
pub async fn all_applications(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let applications = state.application_service.list_all().await?;
    Ok(Json(applications))
}

#[utoipa::path(
    patch,
    path = "/api/hr/applications/{id}/status",
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = UpdateApplicationStatusPayload,
    responses(
        (status = 200, description = "Status updated, candidate notified"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn update_application_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateApplicationStatusPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state
        .application_service
        .update_status(id, payload.status, claims.user_id()?, payload.review_notes)
        .await?;
    Ok(Json(application))
}

#[axum::debug_handler]
pub async fn dashboard_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats = state.application_service.dashboard_stats().await?;
    Ok(Json(stats))
}
