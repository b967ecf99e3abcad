use serde::Deserialize;
use validator::Validate;

use crate::models::requisition::{RequisitionCandidateStatus, RequisitionStatus};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRequisitionPayload {
    #[validate(length(min = 1))]
    pub department: String,
    #[validate(length(min = 1))]
    pub job_role: String,
    #[validate(range(min = 0.0, max = 60.0))]
    pub experience_required: f64,
    #[validate(range(min = 1))]
    pub number_of_positions: i32,
    pub skills_required: Vec<String>,
    pub jd_file_id: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRequisitionStatusPayload {
    pub status: RequisitionStatus,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UploadRequisitionCandidatePayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    #[validate(range(min = 0.0, max = 60.0))]
    pub experience_years: f64,
    #[validate(length(min = 1))]
    pub resume_id: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRequisitionCandidateStatusPayload {
    pub status: RequisitionCandidateStatus,
}
