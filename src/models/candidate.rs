use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub skills: Vec<String>,
    pub experience_years: f64,
    pub education: String,
    pub location: String,
    pub resume_id: Option<String>,
    pub summary: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Profile joined with the owning user row, for HR-facing listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateWithUser {
    pub id: Uuid,
    pub user_id: Uuid,
    pub skills: Vec<String>,
    pub experience_years: f64,
    pub education: String,
    pub location: String,
    pub resume_id: Option<String>,
    pub summary: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// A candidate scored against a job by the matching heuristic.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedCandidate {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
    pub experience_years: f64,
    pub location: String,
    pub match_percentage: i32,
    pub matching_skills: Vec<String>,
}
