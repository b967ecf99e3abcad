use sqlx::PgPool;

use crate::error::Result;
use crate::models::master_data::{Department, JobRole};

const DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Product Management",
    "Design",
    "Marketing",
    "Sales",
    "Human Resources",
    "Finance",
    "Operations",
    "Customer Success",
    "Data Science",
];

const JOB_ROLES: &[(&str, &str)] = &[
    ("Software Engineer", "Engineering"),
    ("Senior Software Engineer", "Engineering"),
    ("Frontend Developer", "Engineering"),
    ("Backend Developer", "Engineering"),
    ("Full Stack Developer", "Engineering"),
    ("DevOps Engineer", "Engineering"),
    ("Product Manager", "Product Management"),
    ("Senior Product Manager", "Product Management"),
    ("UI/UX Designer", "Design"),
    ("Graphic Designer", "Design"),
    ("Marketing Manager", "Marketing"),
    ("Digital Marketing Specialist", "Marketing"),
    ("Sales Executive", "Sales"),
    ("Business Development Manager", "Sales"),
    ("HR Specialist", "Human Resources"),
    ("Talent Acquisition Specialist", "Human Resources"),
    ("Data Scientist", "Data Science"),
    ("Data Analyst", "Data Science"),
];

#[derive(Clone)]
pub struct MasterDataService {
    pool: PgPool,
}

impl MasterDataService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotent load of the picker lookup lists; existing rows are left
    /// alone.
    pub async fn initialize(&self) -> Result<()> {
        for department in DEPARTMENTS {
            sqlx::query(
                "INSERT INTO master_departments (name) VALUES ($1) ON CONFLICT DO NOTHING",
            )
            .bind(department)
            .execute(&self.pool)
            .await?;
        }

        for (title, department) in JOB_ROLES {
            sqlx::query(
                "INSERT INTO master_job_roles (title, department) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(title)
            .bind(department)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    pub async fn list_departments(&self) -> Result<Vec<Department>> {
        let departments = sqlx::query_as::<_, Department>(
            "SELECT * FROM master_departments WHERE is_active = TRUE ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(departments)
    }

    pub async fn list_roles_by_department(&self, department: &str) -> Result<Vec<JobRole>> {
        let roles = sqlx::query_as::<_, JobRole>(
            "SELECT * FROM master_job_roles WHERE department = $1 AND is_active = TRUE ORDER BY title",
        )
        .bind(department)
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }

    pub async fn list_all_roles(&self) -> Result<Vec<JobRole>> {
        let roles = sqlx::query_as::<_, JobRole>(
            "SELECT * FROM master_job_roles WHERE is_active = TRUE ORDER BY department, title",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }
}
