use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::interview_dto::{CreateInterviewPayload, UpdateInterviewPayload};
use crate::error::{Error, Result};
use crate::models::interview::{Interview, InterviewDetailed, InterviewStatus};

#[derive(Clone)]
pub struct InterviewService {
    pool: PgPool,
}

impl InterviewService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Schedules an interview and tells the candidate in the same
    /// transaction.
    pub async fn create(&self, payload: CreateInterviewPayload) -> Result<Interview> {
        let mut tx = self.pool.begin().await?;

        let interview = sqlx::query_as::<_, Interview>(
            r#"
            INSERT INTO interviews (
                application_id, scheduled_date, interviewer_name,
                interviewer_email, meeting_link, notes
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(payload.application_id)
        .bind(payload.scheduled_date)
        .bind(&payload.interviewer_name)
        .bind(&payload.interviewer_email)
        .bind(&payload.meeting_link)
        .bind(&payload.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            match e.as_database_error().and_then(|db| db.constraint()) {
                Some("interviews_application_id_fkey") => {
                    Error::NotFound("Application not found".to_string())
                }
                _ => Error::from(e),
            }
        })?;

        sqlx::query(
            r#"
            INSERT INTO notifications (user_id, title, message, type, related_id)
            SELECT a.candidate_id,
                   'Interview Scheduled',
                   'Your interview for ' || j.title || ' is scheduled on ' ||
                       to_char($2::timestamptz, 'YYYY-MM-DD HH24:MI') || ' UTC.',
                   'interview_scheduled',
                   $3
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            WHERE a.id = $1
            "#,
        )
        .bind(payload.application_id)
        .bind(payload.scheduled_date)
        .bind(interview.id.to_string())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(interview_id = %interview.id, "interview scheduled");
        Ok(interview)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Interview> {
        let interview = sqlx::query_as::<_, Interview>("SELECT * FROM interviews WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(interview)
    }

    pub async fn list_all(&self) -> Result<Vec<Interview>> {
        let interviews =
            sqlx::query_as::<_, Interview>("SELECT * FROM interviews ORDER BY scheduled_date ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(interviews)
    }

    pub async fn list_by_application(&self, application_id: Uuid) -> Result<Vec<Interview>> {
        let interviews = sqlx::query_as::<_, Interview>(
            "SELECT * FROM interviews WHERE application_id = $1 ORDER BY scheduled_date ASC",
        )
        .bind(application_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(interviews)
    }

    pub async fn list_detailed(&self) -> Result<Vec<InterviewDetailed>> {
        let interviews = sqlx::query_as::<_, InterviewDetailed>(
            r#"
            SELECT i.*,
                   j.id AS job_id,
                   j.title AS job_title,
                   u.id AS candidate_id,
                   u.name AS candidate_name,
                   u.email AS candidate_email
            FROM interviews i
            JOIN applications a ON a.id = i.application_id
            JOIN jobs j ON j.id = a.job_id
            JOIN users u ON u.id = a.candidate_id
            ORDER BY i.scheduled_date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(interviews)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateInterviewPayload) -> Result<Interview> {
        let interview = sqlx::query_as::<_, Interview>(
            r#"
            UPDATE interviews
            SET
                scheduled_date = COALESCE($2, scheduled_date),
                interviewer_name = COALESCE($3, interviewer_name),
                interviewer_email = COALESCE($4, interviewer_email),
                meeting_link = COALESCE($5, meeting_link),
                notes = COALESCE($6, notes)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.scheduled_date)
        .bind(&payload.interviewer_name)
        .bind(&payload.interviewer_email)
        .bind(&payload.meeting_link)
        .bind(&payload.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(interview)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: InterviewStatus,
        notes: Option<String>,
    ) -> Result<Interview> {
        let interview = sqlx::query_as::<_, Interview>(
            r#"
            UPDATE interviews
            SET status = $2, notes = COALESCE($3, notes)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(&notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(interview)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let deleted = sqlx::query("DELETE FROM interviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(Error::NotFound("Interview not found".to_string()));
        }
        Ok(())
    }
}
