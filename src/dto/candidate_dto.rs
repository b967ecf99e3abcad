use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfilePayload {
    pub skills: Option<Vec<String>>,
    #[validate(range(min = 0.0, max = 60.0))]
    pub experience_years: Option<f64>,
    pub education: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    #[validate(url)]
    pub linkedin_url: Option<String>,
    #[validate(url)]
    pub github_url: Option<String>,
}
