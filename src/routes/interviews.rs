use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::interview_dto::{
        CreateInterviewPayload, UpdateInterviewPayload, UpdateInterviewStatusPayload,
    },
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn create_interview(
    State(state): State<AppState>,
    Json(payload): Json<CreateInterviewPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let interview = state.interview_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(interview)))
}

#[axum::debug_handler]
pub async fn list_interviews(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let interviews = state.interview_service.list_all().await?;
    Ok(Json(interviews))
}

#[axum::debug_handler]
pub async fn list_interviews_detailed(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let interviews = state.interview_service.list_detailed().await?;
    Ok(Json(interviews))
}

#[axum::debug_handler]
pub async fn get_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let interview = state.interview_service.get_by_id(id).await?;
    Ok(Json(interview))
}

#[axum::debug_handler]
pub async fn interviews_by_application(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let interviews = state
        .interview_service
        .list_by_application(application_id)
        .await?;
    Ok(Json(interviews))
}

#[axum::debug_handler]
pub async fn update_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateInterviewPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let interview = state.interview_service.update(id, payload).await?;
    Ok(Json(interview))
}

#[axum::debug_handler]
pub async fn update_interview_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateInterviewStatusPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let interview = state
        .interview_service
        .update_status(id, payload.status, payload.notes)
        .await?;
    Ok(Json(interview))
}

#[axum::debug_handler]
pub async fn delete_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.interview_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
