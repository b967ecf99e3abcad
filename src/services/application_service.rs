use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::application_dto::DashboardStats;
use crate::error::{conflict_on, Error, Result};
use crate::models::application::{
    Application, ApplicationDetail, ApplicationStatus, ApplicationWithCandidate, ApplicationWithJob,
};

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

/// State-specific candidate notification copy for a status transition.
/// `applied` is the initial state and produces none.
pub fn status_notification(
    status: ApplicationStatus,
    job_title: &str,
) -> Option<(String, String)> {
    match status {
        ApplicationStatus::Screening => Some((
            "Application Under Review".to_string(),
            format!("Your application for {} is now under review.", job_title),
        )),
        ApplicationStatus::InterviewScheduled => Some((
            "Interview Scheduled".to_string(),
            format!(
                "Congratulations! An interview has been scheduled for {}.",
                job_title
            ),
        )),
        ApplicationStatus::Interviewed => Some((
            "Interview Completed".to_string(),
            format!(
                "Thank you for interviewing for {}. We'll be in touch soon.",
                job_title
            ),
        )),
        ApplicationStatus::Selected => Some((
            "\u{1F389} Congratulations! You're Selected".to_string(),
            format!(
                "Great news! You have been selected for the {} position. HR will contact you soon with next steps.",
                job_title
            ),
        )),
        ApplicationStatus::Rejected => Some((
            "Application Update".to_string(),
            format!(
                "Thank you for your interest in {}. We've decided to move forward with other candidates.",
                job_title
            ),
        )),
        ApplicationStatus::Applied => None,
    }
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Files an application. The (job, candidate) pair is guarded by a unique
    /// constraint, so two concurrent applies cannot both succeed; the loser
    /// sees a conflict. The poster notification commits with the application.
    pub async fn apply(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
        cover_letter: Option<String>,
    ) -> Result<Application> {
        let mut tx = self.pool.begin().await?;

        let application = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (job_id, candidate_id, cover_letter)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(job_id)
        .bind(candidate_id)
        .bind(&cover_letter)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(constraint) = e.as_database_error().and_then(|db| db.constraint()) {
                if constraint == "applications_job_id_fkey" {
                    return Error::NotFound("Job not found".to_string());
                }
            }
            conflict_on(
                e,
                "uq_applications_job_candidate",
                "You have already applied to this job",
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO notifications (user_id, title, message, type, related_id)
            SELECT j.posted_by,
                   'New Job Application',
                   u.name || ' applied for ' || j.title,
                   'application_status',
                   $3
            FROM jobs j, users u
            WHERE j.id = $1 AND u.id = $2
            "#,
        )
        .bind(job_id)
        .bind(candidate_id)
        .bind(application.id.to_string())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(application_id = %application.id, job_id = %job_id, "application filed");
        Ok(application)
    }

    pub async fn list_by_job(&self, job_id: Uuid) -> Result<Vec<ApplicationWithCandidate>> {
        let rows = sqlx::query_as::<_, ApplicationWithCandidate>(
            r#"
            SELECT a.*,
                   u.name AS candidate_name,
                   u.email AS candidate_email,
                   u.phone AS candidate_phone,
                   cp.skills AS candidate_skills,
                   cp.experience_years AS candidate_experience,
                   cp.location AS candidate_location
            FROM applications a
            JOIN users u ON u.id = a.candidate_id
            LEFT JOIN candidate_profiles cp ON cp.user_id = a.candidate_id
            WHERE a.job_id = $1
            ORDER BY a.applied_at DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_candidate(&self, candidate_id: Uuid) -> Result<Vec<ApplicationWithJob>> {
        let rows = sqlx::query_as::<_, ApplicationWithJob>(
            r#"
            SELECT a.id, a.job_id, a.candidate_id, a.status, a.applied_at, a.cover_letter,
                   j.title AS job_title,
                   j.department AS job_department,
                   j.location AS job_location,
                   j.salary_min AS job_salary_min,
                   j.salary_max AS job_salary_max,
                   j.currency AS job_currency
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            WHERE a.candidate_id = $1
            ORDER BY a.applied_at DESC
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_all(&self) -> Result<Vec<ApplicationDetail>> {
        let rows = sqlx::query_as::<_, ApplicationDetail>(
            r#"
            SELECT a.id, a.job_id, a.candidate_id, a.status, a.applied_at, a.cover_letter,
                   a.reviewed_by, a.reviewed_at, a.review_notes,
                   j.title AS job_title,
                   j.department AS job_department,
                   j.location AS job_location,
                   u.name AS candidate_name,
                   u.email AS candidate_email,
                   u.phone AS candidate_phone
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            JOIN users u ON u.id = a.candidate_id
            ORDER BY a.applied_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Moves an application to `status`, stamping the reviewer, and inserts
    /// the matching candidate notification in the same transaction.
    pub async fn update_status(
        &self,
        application_id: Uuid,
        status: ApplicationStatus,
        reviewed_by: Uuid,
        review_notes: Option<String>,
    ) -> Result<Application> {
        let mut tx = self.pool.begin().await?;

        let application = sqlx::query_as::<_, Application>(
            r#"
            UPDATE applications
            SET status = $2, reviewed_by = $3, reviewed_at = NOW(), review_notes = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(application_id)
        .bind(status)
        .bind(reviewed_by)
        .bind(&review_notes)
        .fetch_one(&mut *tx)
        .await?;

        let job_title: String = sqlx::query_scalar("SELECT title FROM jobs WHERE id = $1")
            .bind(application.job_id)
            .fetch_one(&mut *tx)
            .await?;

        if let Some((title, message)) = status_notification(status, &job_title) {
            sqlx::query(
                r#"
                INSERT INTO notifications (user_id, title, message, type, related_id)
                VALUES ($1, $2, $3, 'application_status', $4)
                "#,
            )
            .bind(application.candidate_id)
            .bind(&title)
            .bind(&message)
            .bind(application.id.to_string())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(application_id = %application_id, status = ?status, "application status updated");
        Ok(application)
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let (total_jobs, active_jobs): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COUNT(*) FILTER (WHERE status = 'active')
            FROM jobs
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let (total_applications, selected_candidates, pending_applications): (i64, i64, i64) =
            sqlx::query_as(
                r#"
                SELECT COUNT(*),
                       COUNT(*) FILTER (WHERE status = 'selected'),
                       COUNT(*) FILTER (WHERE status = 'applied')
                FROM applications
                "#,
            )
            .fetch_one(&self.pool)
            .await?;

        Ok(DashboardStats {
            total_jobs,
            active_jobs,
            total_applications,
            selected_candidates,
            pending_applications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_copy_congratulates() {
        let (title, message) =
            status_notification(ApplicationStatus::Selected, "Backend Engineer").unwrap();
        assert!(title.contains("Congratulations"));
        assert!(message.contains("Backend Engineer"));
    }

    #[test]
    fn applied_is_silent() {
        assert!(status_notification(ApplicationStatus::Applied, "Backend Engineer").is_none());
    }

    #[test]
    fn every_review_state_names_the_job() {
        for status in [
            ApplicationStatus::Screening,
            ApplicationStatus::InterviewScheduled,
            ApplicationStatus::Interviewed,
            ApplicationStatus::Selected,
            ApplicationStatus::Rejected,
        ] {
            let (_, message) = status_notification(status, "QA Lead").unwrap();
            assert!(message.contains("QA Lead"), "missing job title for {:?}", status);
        }
    }

    #[test]
    fn rejection_copy_is_neutral() {
        let (title, _) = status_notification(ApplicationStatus::Rejected, "QA Lead").unwrap();
        assert_eq!(title, "Application Update");
    }
}
