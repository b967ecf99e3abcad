use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::notification_dto::{CreateNotificationPayload, UnreadCountResponse},
    error::Result,
    middleware::auth::Claims,
    AppState,
};

#[axum::debug_handler]
pub async fn create_notification(
    State(state): State<AppState>,
    Json(payload): Json<CreateNotificationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let notification = state.notification_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

#[axum::debug_handler]
pub async fn my_notifications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let notifications = state
        .notification_service
        .list_for_user(claims.user_id()?)
        .await?;
    Ok(Json(notifications))
}

#[axum::debug_handler]
pub async fn unread_count(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let count = state
        .notification_service
        .unread_count(claims.user_id()?)
        .await?;
    Ok(Json(UnreadCountResponse { count }))
}

#[axum::debug_handler]
pub async fn mark_read(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state
        .notification_service
        .mark_read(id, claims.user_id()?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn mark_all_read(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let updated = state
        .notification_service
        .mark_all_read(claims.user_id()?)
        .await?;
    Ok(Json(serde_json::json!({ "updated": updated })))
}
