use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::requisition_dto::{CreateRequisitionPayload, UploadRequisitionCandidatePayload};
use crate::error::{Error, Result};
use crate::models::requisition::{
    Requisition, RequisitionCandidate, RequisitionCandidateStatus, RequisitionCandidateWithNames,
    RequisitionStatus, RequisitionWithCount, RequisitionWithNames,
};

#[derive(Clone)]
pub struct RequisitionService {
    pool: PgPool,
}

impl RequisitionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a requisition and notifies every HR and admin user in one
    /// batched insert inside the transaction.
    pub async fn create(
        &self,
        payload: CreateRequisitionPayload,
        created_by: Uuid,
    ) -> Result<Requisition> {
        let mut tx = self.pool.begin().await?;

        let requisition = sqlx::query_as::<_, Requisition>(
            r#"
            INSERT INTO requisitions (
                department, job_role, experience_required, number_of_positions,
                skills_required, jd_file_id, description, created_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&payload.department)
        .bind(&payload.job_role)
        .bind(payload.experience_required)
        .bind(payload.number_of_positions)
        .bind(&payload.skills_required)
        .bind(&payload.jd_file_id)
        .bind(&payload.description)
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await?;

        let message = format!(
            "A new requisition for {} in {} has been created.",
            requisition.job_role, requisition.department
        );
        let notified = sqlx::query(
            r#"
            INSERT INTO notifications (user_id, title, message, type, related_id)
            SELECT u.id, 'New Requisition Created', $1, 'general', $2
            FROM users u
            WHERE u.role IN ('hr', 'admin')
            "#,
        )
        .bind(&message)
        .bind(requisition.id.to_string())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        tracing::info!(requisition_id = %requisition.id, reviewers_notified = notified, "requisition created");
        Ok(requisition)
    }

    pub async fn list_all(&self) -> Result<Vec<RequisitionWithNames>> {
        let requisitions = sqlx::query_as::<_, RequisitionWithNames>(
            r#"
            SELECT r.*,
                   creator.name AS creator_name,
                   approver.name AS approver_name
            FROM requisitions r
            JOIN users creator ON creator.id = r.created_by
            LEFT JOIN users approver ON approver.id = r.approved_by
            ORDER BY r.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(requisitions)
    }

    pub async fn list_approved(&self) -> Result<Vec<RequisitionWithCount>> {
        let requisitions = sqlx::query_as::<_, RequisitionWithCount>(
            r#"
            SELECT r.*,
                   creator.name AS creator_name,
                   (SELECT COUNT(*) FROM requisition_candidates rc
                     WHERE rc.requisition_id = r.id) AS candidates_count
            FROM requisitions r
            JOIN users creator ON creator.id = r.created_by
            WHERE r.status = 'approved'
            ORDER BY r.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(requisitions)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<RequisitionWithNames> {
        let requisition = sqlx::query_as::<_, RequisitionWithNames>(
            r#"
            SELECT r.*,
                   creator.name AS creator_name,
                   approver.name AS approver_name
            FROM requisitions r
            JOIN users creator ON creator.id = r.created_by
            LEFT JOIN users approver ON approver.id = r.approved_by
            WHERE r.id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(requisition)
    }

    /// Moves a requisition through pending → approved → closed. Approval
    /// stamps the approver and time; other transitions leave them untouched.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: RequisitionStatus,
        actor: Uuid,
    ) -> Result<Requisition> {
        let requisition = sqlx::query_as::<_, Requisition>(
            r#"
            UPDATE requisitions
            SET status = $2,
                approved_by = CASE WHEN $2 = 'approved' THEN $3 ELSE approved_by END,
                approved_at = CASE WHEN $2 = 'approved' THEN NOW() ELSE approved_at END
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(actor)
        .fetch_one(&self.pool)
        .await?;
        Ok(requisition)
    }

    /// Attaches a sourced candidate to an approved requisition and notifies
    /// its creator in the same transaction.
    pub async fn upload_candidate(
        &self,
        requisition_id: Uuid,
        payload: UploadRequisitionCandidatePayload,
        uploaded_by: Uuid,
    ) -> Result<RequisitionCandidate> {
        let mut tx = self.pool.begin().await?;

        let status: Option<RequisitionStatus> =
            sqlx::query_scalar("SELECT status FROM requisitions WHERE id = $1")
                .bind(requisition_id)
                .fetch_optional(&mut *tx)
                .await?;
        match status {
            None => return Err(Error::NotFound("Requisition not found".to_string())),
            Some(RequisitionStatus::Approved) => {}
            Some(_) => {
                return Err(Error::BadRequest(
                    "Requisition must be approved before uploading candidates".to_string(),
                ))
            }
        }

        let candidate = sqlx::query_as::<_, RequisitionCandidate>(
            r#"
            INSERT INTO requisition_candidates (
                requisition_id, name, email, phone, skills, experience_years,
                resume_id, uploaded_by, notes
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(requisition_id)
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(&payload.skills)
        .bind(payload.experience_years)
        .bind(&payload.resume_id)
        .bind(uploaded_by)
        .bind(&payload.notes)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO notifications (user_id, title, message, type, related_id)
            SELECT r.created_by,
                   'New Candidate Uploaded',
                   'A new candidate ' || $2 || ' has been uploaded for ' || r.job_role || ' position.',
                   'general',
                   $3
            FROM requisitions r
            WHERE r.id = $1
            "#,
        )
        .bind(requisition_id)
        .bind(&payload.name)
        .bind(candidate.id.to_string())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(candidate)
    }

    pub async fn list_candidates(
        &self,
        requisition_id: Uuid,
    ) -> Result<Vec<RequisitionCandidateWithNames>> {
        let candidates = sqlx::query_as::<_, RequisitionCandidateWithNames>(
            r#"
            SELECT rc.*,
                   uploader.name AS uploader_name,
                   reviewer.name AS reviewer_name
            FROM requisition_candidates rc
            JOIN users uploader ON uploader.id = rc.uploaded_by
            LEFT JOIN users reviewer ON reviewer.id = rc.reviewed_by
            WHERE rc.requisition_id = $1
            ORDER BY rc.created_at DESC
            "#,
        )
        .bind(requisition_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(candidates)
    }

    pub async fn update_candidate_status(
        &self,
        id: Uuid,
        status: RequisitionCandidateStatus,
        reviewer: Uuid,
    ) -> Result<RequisitionCandidate> {
        let candidate = sqlx::query_as::<_, RequisitionCandidate>(
            r#"
            UPDATE requisition_candidates
            SET status = $2, reviewed_by = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(reviewer)
        .fetch_one(&self.pool)
        .await?;
        Ok(candidate)
    }
}
