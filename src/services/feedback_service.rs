use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::feedback_dto::{SubmitFeedbackPayload, UpdateFeedbackPayload};
use crate::error::{Error, Result};
use crate::models::feedback::Feedback;

#[derive(Clone)]
pub struct FeedbackService {
    pool: PgPool,
}

impl FeedbackService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn submit(&self, payload: SubmitFeedbackPayload) -> Result<Feedback> {
        let feedback = sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO feedback (
                interview_id, candidate_id, job_id, interviewer_name,
                overall_rating, technical_skills, communication_skills,
                problem_solving, cultural_fit, strengths, weaknesses,
                recommendation, additional_comments
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(payload.interview_id)
        .bind(payload.candidate_id)
        .bind(payload.job_id)
        .bind(&payload.interviewer_name)
        .bind(payload.overall_rating)
        .bind(payload.technical_skills)
        .bind(payload.communication_skills)
        .bind(payload.problem_solving)
        .bind(payload.cultural_fit)
        .bind(&payload.strengths)
        .bind(&payload.weaknesses)
        .bind(&payload.recommendation)
        .bind(&payload.additional_comments)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e.as_database_error().and_then(|db| db.constraint()) {
            Some("feedback_interview_id_fkey") => {
                Error::NotFound("Interview not found".to_string())
            }
            _ => Error::from(e),
        })?;
        Ok(feedback)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Feedback> {
        let feedback = sqlx::query_as::<_, Feedback>("SELECT * FROM feedback WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(feedback)
    }

    pub async fn list_all(&self) -> Result<Vec<Feedback>> {
        let rows = sqlx::query_as::<_, Feedback>("SELECT * FROM feedback ORDER BY submitted_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_by_interview(&self, interview_id: Uuid) -> Result<Vec<Feedback>> {
        let rows = sqlx::query_as::<_, Feedback>(
            "SELECT * FROM feedback WHERE interview_id = $1 ORDER BY submitted_at DESC",
        )
        .bind(interview_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_candidate(&self, candidate_id: Uuid) -> Result<Vec<Feedback>> {
        let rows = sqlx::query_as::<_, Feedback>(
            "SELECT * FROM feedback WHERE candidate_id = $1 ORDER BY submitted_at DESC",
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_job(&self, job_id: Uuid) -> Result<Vec<Feedback>> {
        let rows = sqlx::query_as::<_, Feedback>(
            "SELECT * FROM feedback WHERE job_id = $1 ORDER BY submitted_at DESC",
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateFeedbackPayload) -> Result<Feedback> {
        let feedback = sqlx::query_as::<_, Feedback>(
            r#"
            UPDATE feedback
            SET
                overall_rating = COALESCE($2, overall_rating),
                technical_skills = COALESCE($3, technical_skills),
                communication_skills = COALESCE($4, communication_skills),
                problem_solving = COALESCE($5, problem_solving),
                cultural_fit = COALESCE($6, cultural_fit),
                strengths = COALESCE($7, strengths),
                weaknesses = COALESCE($8, weaknesses),
                recommendation = COALESCE($9, recommendation),
                additional_comments = COALESCE($10, additional_comments),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.overall_rating)
        .bind(payload.technical_skills)
        .bind(payload.communication_skills)
        .bind(payload.problem_solving)
        .bind(payload.cultural_fit)
        .bind(&payload.strengths)
        .bind(&payload.weaknesses)
        .bind(&payload.recommendation)
        .bind(&payload.additional_comments)
        .fetch_one(&self.pool)
        .await?;
        Ok(feedback)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let deleted = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(Error::NotFound("Feedback not found".to_string()));
        }
        Ok(())
    }
}
