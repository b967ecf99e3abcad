use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::auth_dto::{AuthResponse, LoginPayload, SignupPayload, UpdateUserPayload, UserSummary},
    error::Result,
    middleware::auth::Claims,
    utils::token::issue_session_token,
    AppState,
};

#[axum::debug_handler]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.user_service.signup(payload).await?;
    let token = issue_session_token(user.id, user.role)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .user_service
        .login(&payload.email, &payload.password)
        .await?;
    let token = issue_session_token(user.id, user.role)?;
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_service
        .get_by_id(claims.user_id()?)
        .await?
        .ok_or_else(|| crate::error::Error::NotFound("User not found".into()))?;
    Ok(Json(UserSummary::from(user)))
}

#[axum::debug_handler]
pub async fn update_me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .user_service
        .update(claims.user_id()?, payload)
        .await?;
    Ok(Json(UserSummary::from(user)))
}
