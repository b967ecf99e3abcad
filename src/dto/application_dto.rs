use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::application::ApplicationStatus;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ApplyPayload {
    pub job_id: Uuid,
    pub cover_letter: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateApplicationStatusPayload {
    pub status: ApplicationStatus,
    pub review_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_jobs: i64,
    pub active_jobs: i64,
    pub total_applications: i64,
    pub selected_candidates: i64,
    pub pending_applications: i64,
}
