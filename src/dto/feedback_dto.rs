use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitFeedbackPayload {
    pub interview_id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    #[validate(length(min = 1))]
    pub interviewer_name: String,
    #[validate(range(min = 1, max = 5))]
    pub overall_rating: i32,
    #[validate(range(min = 1, max = 5))]
    pub technical_skills: i32,
    #[validate(range(min = 1, max = 5))]
    pub communication_skills: i32,
    #[validate(range(min = 1, max = 5))]
    pub problem_solving: i32,
    #[validate(range(min = 1, max = 5))]
    pub cultural_fit: i32,
    #[validate(length(min = 1))]
    pub strengths: String,
    #[validate(length(min = 1))]
    pub weaknesses: String,
    #[validate(length(min = 1))]
    pub recommendation: String,
    pub additional_comments: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateFeedbackPayload {
    #[validate(range(min = 1, max = 5))]
    pub overall_rating: Option<i32>,
    #[validate(range(min = 1, max = 5))]
    pub technical_skills: Option<i32>,
    #[validate(range(min = 1, max = 5))]
    pub communication_skills: Option<i32>,
    #[validate(range(min = 1, max = 5))]
    pub problem_solving: Option<i32>,
    #[validate(range(min = 1, max = 5))]
    pub cultural_fit: Option<i32>,
    #[validate(length(min = 1))]
    pub strengths: Option<String>,
    #[validate(length(min = 1))]
    pub weaknesses: Option<String>,
    #[validate(length(min = 1))]
    pub recommendation: Option<String>,
    pub additional_comments: Option<String>,
}
