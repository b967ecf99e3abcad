use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::feedback_dto::{SubmitFeedbackPayload, UpdateFeedbackPayload},
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(payload): Json<SubmitFeedbackPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let feedback = state.feedback_service.submit(payload).await?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

#[axum::debug_handler]
pub async fn list_feedback(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let rows = state.feedback_service.list_all().await?;
    Ok(Json(rows))
}

#[axum::debug_handler]
pub async fn get_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let feedback = state.feedback_service.get_by_id(id).await?;
    Ok(Json(feedback))
}

#[axum::debug_handler]
pub async fn feedback_by_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let rows = state.feedback_service.list_by_interview(interview_id).await?;
    Ok(Json(rows))
}

#[axum::debug_handler]
pub async fn feedback_by_candidate(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let rows = state.feedback_service.list_by_candidate(candidate_id).await?;
    Ok(Json(rows))
}

#[axum::debug_handler]
pub async fn feedback_by_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let rows = state.feedback_service.list_by_job(job_id).await?;
    Ok(Json(rows))
}

#[axum::debug_handler]
pub async fn update_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFeedbackPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let feedback = state.feedback_service.update(id, payload).await?;
    Ok(Json(feedback))
}

#[axum::debug_handler]
pub async fn delete_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.feedback_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
