use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::{error::Result, AppState};

#[axum::debug_handler]
pub async fn initialize(State(state): State<AppState>) -> Result<impl IntoResponse> {
    state.master_data_service.initialize().await?;
    Ok(Json(json!({ "success": true })))
}

#[axum::debug_handler]
pub async fn list_departments(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let departments = state.master_data_service.list_departments().await?;
    Ok(Json(departments))
}

#[axum::debug_handler]
pub async fn roles_by_department(
    State(state): State<AppState>,
    Path(department): Path<String>,
) -> Result<impl IntoResponse> {
    let roles = state
        .master_data_service
        .list_roles_by_department(&department)
        .await?;
    Ok(Json(roles))
}

#[axum::debug_handler]
pub async fn list_roles(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let roles = state.master_data_service.list_all_roles().await?;
    Ok(Json(roles))
}
