use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::candidate_dto::UpdateProfilePayload,
    error::Result,
    middleware::auth::Claims,
    AppState,
};

#[axum::debug_handler]
pub async fn my_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let profile = state
        .candidate_service
        .get_profile(claims.user_id()?)
        .await?
        .ok_or_else(|| crate::error::Error::NotFound("Candidate profile not found".into()))?;
    Ok(Json(profile))
}

#[axum::debug_handler]
pub async fn update_my_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let profile = state
        .candidate_service
        .update_profile(claims.user_id()?, payload)
        .await?;
    Ok(Json(profile))
}

#[axum::debug_handler]
pub async fn list_candidates(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let candidates = state.candidate_service.list_all().await?;
    Ok(Json(candidates))
}

#[axum::debug_handler]
pub async fn match_candidates(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let matches = state.candidate_service.match_candidates(job_id).await?;
    Ok(Json(matches))
}
