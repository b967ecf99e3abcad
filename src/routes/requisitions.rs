use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::requisition_dto::{
        CreateRequisitionPayload, UpdateRequisitionCandidateStatusPayload,
        UpdateRequisitionStatusPayload, UploadRequisitionCandidatePayload,
    },
    error::Result,
    middleware::auth::Claims,
    AppState,
};

#[axum::debug_handler]
pub async fn create_requisition(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateRequisitionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let requisition = state
        .requisition_service
        .create(payload, claims.user_id()?)
        .await?;
    Ok((StatusCode::CREATED, Json(requisition)))
}

#[axum::debug_handler]
pub async fn list_requisitions(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let requisitions = state.requisition_service.list_all().await?;
    Ok(Json(requisitions))
}

#[axum::debug_handler]
pub async fn list_approved_requisitions(
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let requisitions = state.requisition_service.list_approved().await?;
    Ok(Json(requisitions))
}

#[axum::debug_handler]
pub async fn get_requisition(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let requisition = state.requisition_service.get_by_id(id).await?;
    Ok(Json(requisition))
}

#[axum::debug_handler]
pub async fn update_requisition_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRequisitionStatusPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let requisition = state
        .requisition_service
        .update_status(id, payload.status, claims.user_id()?)
        .await?;
    Ok(Json(requisition))
}

#[axum::debug_handler]
pub async fn upload_requisition_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UploadRequisitionCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let candidate = state
        .requisition_service
        .upload_candidate(id, payload, claims.user_id()?)
        .await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

#[axum::debug_handler]
pub async fn requisition_candidates(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let candidates = state.requisition_service.list_candidates(id).await?;
    Ok(Json(candidates))
}

#[axum::debug_handler]
pub async fn update_requisition_candidate_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRequisitionCandidateStatusPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let candidate = state
        .requisition_service
        .update_candidate_status(id, payload.status, claims.user_id()?)
        .await?;
    Ok(Json(candidate))
}
