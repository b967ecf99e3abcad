use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::candidate_dto::UpdateProfilePayload;
use crate::error::{Error, Result};
use crate::models::candidate::{CandidateProfile, CandidateWithUser, MatchedCandidate};
use crate::models::job::Job;

#[derive(Clone)]
pub struct CandidateService {
    pool: PgPool,
}

/// Weighted skill/experience score between a candidate and a job's
/// requirements. Skills match on case-insensitive substring containment in
/// either direction; the blend is 70% skills, 30% experience, experience
/// capped at 100%.
pub fn compute_match(
    required_skills: &[String],
    candidate_skills: &[String],
    required_years: f64,
    candidate_years: f64,
) -> (i32, Vec<String>) {
    let job_skills: Vec<String> = required_skills.iter().map(|s| s.to_lowercase()).collect();
    let matching_skills: Vec<String> = candidate_skills
        .iter()
        .map(|s| s.to_lowercase())
        .filter(|skill| {
            job_skills
                .iter()
                .any(|job_skill| job_skill.contains(skill.as_str()) || skill.contains(job_skill))
        })
        .collect();

    let skill_pct = if job_skills.is_empty() {
        0.0
    } else {
        matching_skills.len() as f64 / job_skills.len() as f64 * 100.0
    };

    let experience_pct = if required_years == 0.0 || candidate_years >= required_years {
        100.0
    } else {
        candidate_years / required_years * 100.0
    };

    let overall = (skill_pct * 0.7 + experience_pct * 0.3).round() as i32;
    (overall, matching_skills)
}

impl CandidateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_profile(&self, user_id: Uuid) -> Result<Option<CandidateProfile>> {
        let profile = sqlx::query_as::<_, CandidateProfile>(
            "SELECT * FROM candidate_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        payload: UpdateProfilePayload,
    ) -> Result<CandidateProfile> {
        let profile = sqlx::query_as::<_, CandidateProfile>(
            r#"
            UPDATE candidate_profiles
            SET
                skills = COALESCE($2, skills),
                experience_years = COALESCE($3, experience_years),
                education = COALESCE($4, education),
                location = COALESCE($5, location),
                summary = COALESCE($6, summary),
                linkedin_url = COALESCE($7, linkedin_url),
                github_url = COALESCE($8, github_url)
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&payload.skills)
        .bind(payload.experience_years)
        .bind(&payload.education)
        .bind(&payload.location)
        .bind(&payload.summary)
        .bind(&payload.linkedin_url)
        .bind(&payload.github_url)
        .fetch_optional(&self.pool)
        .await?;

        profile.ok_or_else(|| Error::NotFound("Candidate profile not found".to_string()))
    }

    pub async fn list_all(&self) -> Result<Vec<CandidateWithUser>> {
        let candidates = sqlx::query_as::<_, CandidateWithUser>(
            r#"
            SELECT cp.*, u.name, u.email, u.phone
            FROM candidate_profiles cp
            JOIN users u ON u.id = cp.user_id
            ORDER BY cp.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(candidates)
    }

    /// Ranks every candidate against the job: scores above 20 only, best
    /// first, at most ten.
    pub async fn match_candidates(&self, job_id: Uuid) -> Result<Vec<MatchedCandidate>> {
        let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(job_id)
            .fetch_one(&self.pool)
            .await?;

        let candidates = self.list_all().await?;

        let mut matched: Vec<MatchedCandidate> = candidates
            .into_iter()
            .map(|candidate| {
                let (match_percentage, matching_skills) = compute_match(
                    &job.required_skills,
                    &candidate.skills,
                    job.experience_required,
                    candidate.experience_years,
                );
                MatchedCandidate {
                    user_id: candidate.user_id,
                    name: candidate.name,
                    email: candidate.email,
                    skills: candidate.skills,
                    experience_years: candidate.experience_years,
                    location: candidate.location,
                    match_percentage,
                    matching_skills,
                }
            })
            .filter(|candidate| candidate.match_percentage > 20)
            .collect();

        matched.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
        matched.truncate(10);
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn half_skill_half_experience_scores_fifty() {
        let (overall, matching) = compute_match(
            &skills(&["React", "Node.js"]),
            &skills(&["react", "python"]),
            4.0,
            2.0,
        );
        assert_eq!(matching, vec!["react".to_string()]);
        assert_eq!(overall, 50);
    }

    #[test]
    fn full_match_scores_hundred() {
        let (overall, _) = compute_match(
            &skills(&["Rust", "SQL"]),
            &skills(&["rust", "sql", "docker"]),
            3.0,
            5.0,
        );
        assert_eq!(overall, 100);
    }

    #[test]
    fn experience_is_capped_not_rewarded() {
        let low = compute_match(&skills(&["Go"]), &skills(&["go"]), 2.0, 2.0).0;
        let high = compute_match(&skills(&["Go"]), &skills(&["go"]), 2.0, 20.0).0;
        assert_eq!(low, high);
    }

    #[test]
    fn zero_required_experience_counts_as_met() {
        let (overall, _) = compute_match(&skills(&["C"]), &skills(&["c"]), 0.0, 0.0);
        assert_eq!(overall, 100);
    }

    #[test]
    fn no_required_skills_scores_experience_only() {
        let (overall, matching) = compute_match(&[], &skills(&["java"]), 4.0, 4.0);
        assert!(matching.is_empty());
        assert_eq!(overall, 30);
    }

    #[test]
    fn substring_containment_matches_both_directions() {
        let (_, matching) = compute_match(
            &skills(&["JavaScript"]),
            &skills(&["java", "typescript"]),
            0.0,
            0.0,
        );
        assert_eq!(matching, vec!["java".to_string()]);
    }
}
