use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Feedback {
    pub id: Uuid,
    pub interview_id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    pub interviewer_name: String,
    pub overall_rating: i32,
    pub technical_skills: i32,
    pub communication_skills: i32,
    pub problem_solving: i32,
    pub cultural_fit: i32,
    pub strengths: String,
    pub weaknesses: String,
    pub recommendation: String,
    pub additional_comments: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
