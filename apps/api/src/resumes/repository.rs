use sqlx::types::Json;
use sqlx::PgPool;

use crate::extraction::models::ExtractedSkills;
use crate::models::resume::{ResumeRow, ResumeSummaryRow};

pub struct NewResume<'a> {
    pub filename: &'a str,
    pub storage_key: &'a str,
    pub extracted_text: &'a str,
    pub extracted_skills: &'a ExtractedSkills,
}

/// Inserts a resume record and returns its id.
pub async fn insert(pool: &PgPool, resume: NewResume<'_>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO resumes (filename, storage_key, extracted_text, extracted_skills)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(resume.filename)
    .bind(resume.storage_key)
    .bind(resume.extracted_text)
    .bind(Json(resume.extracted_skills))
    .fetch_one(pool)
    .await
}

pub async fn get(pool: &PgPool, id: i64) -> Result<Option<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        r#"
        SELECT id, filename, storage_key, extracted_text, extracted_skills
        FROM resumes
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn latest(pool: &PgPool) -> Result<Option<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        r#"
        SELECT id, filename, storage_key, extracted_text, extracted_skills
        FROM resumes
        ORDER BY created_at DESC, id DESC
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await
}

/// Newest first.
pub async fn list(pool: &PgPool) -> Result<Vec<ResumeSummaryRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeSummaryRow>(
        "SELECT id, filename, created_at FROM resumes ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await
}

/// The given resume, or the most recent one when no id is supplied.
pub async fn find(pool: &PgPool, id: Option<i64>) -> Result<Option<ResumeRow>, sqlx::Error> {
    match id {
        Some(id) => get(pool, id).await,
        None => latest(pool).await,
    }
}
