use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
pub enum JobStatus {
    Active,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub department: String,
    pub experience_required: f64,
    pub salary_min: Decimal,
    pub salary_max: Decimal,
    pub currency: String,
    pub location: String,
    pub required_skills: Vec<String>,
    pub status: JobStatus,
    pub posted_by: Uuid,
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobWithPoster {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub department: String,
    pub experience_required: f64,
    pub salary_min: Decimal,
    pub salary_max: Decimal,
    pub currency: String,
    pub location: String,
    pub required_skills: Vec<String>,
    pub status: JobStatus,
    pub posted_by: Uuid,
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub poster_name: String,
}
