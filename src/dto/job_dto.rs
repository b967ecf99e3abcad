use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::job::JobStatus;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub department: String,
    #[validate(range(min = 0.0, max = 60.0))]
    pub experience_required: f64,
    pub salary_min: Decimal,
    pub salary_max: Decimal,
    pub currency: Option<String>,
    #[validate(length(min = 1))]
    pub location: String,
    pub required_skills: Vec<String>,
    pub deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateJobPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub department: Option<String>,
    #[validate(range(min = 0.0, max = 60.0))]
    pub experience_required: Option<f64>,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub currency: Option<String>,
    #[validate(length(min = 1))]
    pub location: Option<String>,
    pub required_skills: Option<Vec<String>>,
    pub status: Option<JobStatus>,
    pub deadline: Option<DateTime<Utc>>,
}

/// Search filters applied in memory over active jobs. `skills` is a
/// comma-separated list; `experience_level` one of fresher/junior/mid/senior.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct JobSearchQuery {
    pub q: Option<String>,
    pub location: Option<String>,
    pub experience_level: Option<String>,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub skills: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConvertCurrencyQuery {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertCurrencyResponse {
    pub original_amount: f64,
    pub converted_amount: i64,
    pub from_currency: String,
    pub to_currency: String,
    pub exchange_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteJobResponse {
    pub success: bool,
    pub deleted_applications: u64,
}
