use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::auth_dto::{SignupPayload, UpdateUserPayload};
use crate::error::{Error, Result};
use crate::models::user::{User, UserRole};
use crate::utils::crypto;

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Registers a user. Candidate signups get an empty profile in the same
    /// transaction; duplicate emails and a second admin are rejected by the
    /// database constraints rather than a pre-read.
    pub async fn signup(&self, payload: SignupPayload) -> Result<User> {
        let password_hash = crypto::hash_password(&payload.password)?;

        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, name, role, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&payload.email)
        .bind(&password_hash)
        .bind(&payload.name)
        .bind(payload.role)
        .bind(&payload.phone)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e.as_database_error().and_then(|db| db.constraint()) {
            Some("uq_users_email") => {
                Error::Conflict("User with this email already exists".to_string())
            }
            Some("uq_users_single_admin") => Error::Conflict(
                "An admin account already exists. Only one admin is allowed.".to_string(),
            ),
            _ => Error::from(e),
        })?;

        if user.role == UserRole::Candidate {
            sqlx::query(
                r#"
                INSERT INTO candidate_profiles (user_id, skills, experience_years, education, location)
                VALUES ($1, '{}', 0, '', '')
                "#,
            )
            .bind(user.id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(user_id = %user.id, role = user.role.as_str(), "user registered");
        Ok(user)
    }

    /// Credential check. A missing user and a wrong password are deliberately
    /// indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        let Some(user) = user else {
            return Err(Error::Unauthorized("Invalid email or password".to_string()));
        };

        if !crypto::verify_password(password, &user.password_hash)? {
            return Err(Error::Unauthorized("Invalid email or password".to_string()));
        }

        Ok(user)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateUserPayload) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                profile_image = COALESCE($4, profile_image),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.phone)
        .bind(&payload.profile_image)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }
}
