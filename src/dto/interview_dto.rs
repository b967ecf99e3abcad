use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::interview::InterviewStatus;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInterviewPayload {
    pub application_id: Uuid,
    pub scheduled_date: DateTime<Utc>,
    #[validate(length(min = 1))]
    pub interviewer_name: String,
    #[validate(email)]
    pub interviewer_email: String,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateInterviewPayload {
    pub scheduled_date: Option<DateTime<Utc>>,
    #[validate(length(min = 1))]
    pub interviewer_name: Option<String>,
    #[validate(email)]
    pub interviewer_email: Option<String>,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateInterviewStatusPayload {
    pub status: InterviewStatus,
    pub notes: Option<String>,
}
