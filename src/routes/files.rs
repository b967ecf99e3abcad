use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::file_dto::{UploadFilePayload, UploadResponse},
    error::Result,
    middleware::auth::Claims,
    AppState,
};

#[axum::debug_handler]
pub async fn upload_resume(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UploadFilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let stored = state
        .file_service
        .store_resume(claims.user_id()?, &payload)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            file_id: stored.file_id,
            url: stored.url,
        }),
    ))
}

#[axum::debug_handler]
pub async fn upload_profile_image(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UploadFilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let stored = state
        .file_service
        .store_profile_image(claims.user_id()?, &payload)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            file_id: stored.file_id,
            url: stored.url,
        }),
    ))
}

#[axum::debug_handler]
pub async fn upload_jd(
    State(state): State<AppState>,
    Json(payload): Json<UploadFilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let stored = state.file_service.store_jd(&payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            file_id: stored.file_id,
            url: stored.url,
        }),
    ))
}

#[axum::debug_handler]
pub async fn delete_file(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<impl IntoResponse> {
    state.file_service.delete(&file_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
