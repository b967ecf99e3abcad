use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::job_dto::{ConvertCurrencyResponse, CreateJobPayload, JobSearchQuery, UpdateJobPayload};
use crate::error::Result;
use crate::models::job::{Job, JobWithPoster};

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a job and notifies every candidate profile in one batched
    /// insert. Both writes share the transaction, so a visible job implies a
    /// complete fan-out.
    pub async fn create(&self, payload: CreateJobPayload, posted_by: Uuid) -> Result<Job> {
        let currency = payload.currency.unwrap_or_else(|| "INR".to_string());

        let mut tx = self.pool.begin().await?;

        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (
                title, description, department, experience_required,
                salary_min, salary_max, currency, location, required_skills,
                posted_by, deadline
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.department)
        .bind(payload.experience_required)
        .bind(payload.salary_min)
        .bind(payload.salary_max)
        .bind(&currency)
        .bind(&payload.location)
        .bind(&payload.required_skills)
        .bind(posted_by)
        .bind(payload.deadline)
        .fetch_one(&mut *tx)
        .await?;

        let message = format!(
            "A new {} position has been posted in {}. Check it out!",
            job.title, job.department
        );
        let notified = sqlx::query(
            r#"
            INSERT INTO notifications (user_id, title, message, type, related_id)
            SELECT cp.user_id, 'New Job Posted', $1, 'job_posted', $2
            FROM candidate_profiles cp
            "#,
        )
        .bind(&message)
        .bind(job.id.to_string())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        tracing::info!(job_id = %job.id, candidates_notified = notified, "job posted");
        Ok(job)
    }

    pub async fn list_all(&self) -> Result<Vec<JobWithPoster>> {
        let jobs = sqlx::query_as::<_, JobWithPoster>(
            r#"
            SELECT j.*, u.name AS poster_name
            FROM jobs j
            JOIN users u ON u.id = j.posted_by
            ORDER BY j.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    pub async fn list_active(&self) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            "SELECT * FROM jobs WHERE status = 'active' ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<JobWithPoster> {
        let job = sqlx::query_as::<_, JobWithPoster>(
            r#"
            SELECT j.*, u.name AS poster_name
            FROM jobs j
            JOIN users u ON u.id = j.posted_by
            WHERE j.id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateJobPayload) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                department = COALESCE($4, department),
                experience_required = COALESCE($5, experience_required),
                salary_min = COALESCE($6, salary_min),
                salary_max = COALESCE($7, salary_max),
                currency = COALESCE($8, currency),
                location = COALESCE($9, location),
                required_skills = COALESCE($10, required_skills),
                status = COALESCE($11, status),
                deadline = COALESCE($12, deadline),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.department)
        .bind(payload.experience_required)
        .bind(payload.salary_min)
        .bind(payload.salary_max)
        .bind(&payload.currency)
        .bind(&payload.location)
        .bind(&payload.required_skills)
        .bind(payload.status)
        .bind(payload.deadline)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    /// Deletes the job and its applications in one transaction and reports
    /// how many applications went with it. No orphans either way.
    pub async fn delete(&self, id: Uuid) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        let deleted_applications = sqlx::query("DELETE FROM applications WHERE job_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(crate::error::Error::NotFound("Job not found".to_string()));
        }

        tx.commit().await?;
        Ok(deleted_applications)
    }

    /// Filters active jobs in memory. The experience bands and skill-overlap
    /// checks don't map onto indexes, so the candidate set is fetched once and
    /// narrowed here.
    pub async fn search(&self, query: JobSearchQuery) -> Result<Vec<Job>> {
        let mut jobs = self.list_active().await?;

        if let Some(q) = query.q.as_deref() {
            let q = q.to_lowercase();
            jobs.retain(|job| {
                job.title.to_lowercase().contains(&q)
                    || job.description.to_lowercase().contains(&q)
                    || job.department.to_lowercase().contains(&q)
                    || job
                        .required_skills
                        .iter()
                        .any(|skill| skill.to_lowercase().contains(&q))
            });
        }

        if let Some(location) = query.location.as_deref() {
            let location = location.to_lowercase();
            jobs.retain(|job| job.location.to_lowercase().contains(&location));
        }

        if let Some(level) = query.experience_level.as_deref() {
            jobs.retain(|job| match level {
                "fresher" => job.experience_required == 0.0,
                "junior" => job.experience_required >= 1.0 && job.experience_required <= 3.0,
                "mid" => job.experience_required >= 4.0 && job.experience_required <= 7.0,
                "senior" => job.experience_required >= 8.0,
                _ => true,
            });
        }

        if let (Some(min), Some(max)) = (query.salary_min, query.salary_max) {
            jobs.retain(|job| job.salary_min >= min && job.salary_max <= max);
        }

        if let Some(skills) = query.skills.as_deref() {
            let wanted: Vec<String> = skills
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
            if !wanted.is_empty() {
                jobs.retain(|job| {
                    wanted.iter().any(|skill| {
                        job.required_skills
                            .iter()
                            .any(|job_skill| job_skill.to_lowercase().contains(skill))
                    })
                });
            }
        }

        Ok(jobs)
    }
}

/// Fixed conversion table; unknown pairs fall back to a rate of 1.
pub fn convert_currency(amount: f64, from: &str, to: &str) -> ConvertCurrencyResponse {
    let rate = match (from, to) {
        ("USD", "INR") => 83.0,
        ("INR", "USD") => 0.012,
        (f, t) if f == t => 1.0,
        _ => 1.0,
    };
    ConvertCurrencyResponse {
        original_amount: amount,
        converted_amount: (amount * rate).round() as i64,
        from_currency: from.to_string(),
        to_currency: to.to_string(),
        exchange_rate: rate,
    }
}
