use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "interview_status", rename_all = "lowercase")]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
    Rescheduled,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Interview {
    pub id: Uuid,
    pub application_id: Uuid,
    pub scheduled_date: DateTime<Utc>,
    pub interviewer_name: String,
    pub interviewer_email: String,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
    pub status: InterviewStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewDetailed {
    pub id: Uuid,
    pub application_id: Uuid,
    pub scheduled_date: DateTime<Utc>,
    pub interviewer_name: String,
    pub interviewer_email: String,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
    pub status: InterviewStatus,
    pub created_at: DateTime<Utc>,
    pub job_id: Uuid,
    pub job_title: String,
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub candidate_email: String,
}
