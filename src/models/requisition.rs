use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "requisition_status", rename_all = "lowercase")]
pub enum RequisitionStatus {
    Pending,
    Approved,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Requisition {
    pub id: Uuid,
    pub department: String,
    pub job_role: String,
    pub experience_required: f64,
    pub number_of_positions: i32,
    pub skills_required: Vec<String>,
    pub jd_file_id: Option<String>,
    pub description: Option<String>,
    pub status: RequisitionStatus,
    pub created_by: Uuid,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RequisitionWithNames {
    pub id: Uuid,
    pub department: String,
    pub job_role: String,
    pub experience_required: f64,
    pub number_of_positions: i32,
    pub skills_required: Vec<String>,
    pub jd_file_id: Option<String>,
    pub description: Option<String>,
    pub status: RequisitionStatus,
    pub created_by: Uuid,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub creator_name: String,
    pub approver_name: Option<String>,
}

/// Approved requisition with its sourced-candidate tally.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RequisitionWithCount {
    pub id: Uuid,
    pub department: String,
    pub job_role: String,
    pub experience_required: f64,
    pub number_of_positions: i32,
    pub skills_required: Vec<String>,
    pub jd_file_id: Option<String>,
    pub description: Option<String>,
    pub status: RequisitionStatus,
    pub created_by: Uuid,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub creator_name: String,
    pub candidates_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "requisition_candidate_status", rename_all = "lowercase")]
pub enum RequisitionCandidateStatus {
    Submitted,
    Shortlisted,
    Interviewed,
    Selected,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RequisitionCandidate {
    pub id: Uuid,
    pub requisition_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: f64,
    pub resume_id: String,
    pub status: RequisitionCandidateStatus,
    pub uploaded_by: Uuid,
    pub notes: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RequisitionCandidateWithNames {
    pub id: Uuid,
    pub requisition_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: f64,
    pub resume_id: String,
    pub status: RequisitionCandidateStatus,
    pub uploaded_by: Uuid,
    pub notes: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub uploader_name: String,
    pub reviewer_name: Option<String>,
}
