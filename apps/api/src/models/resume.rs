use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

use crate::extraction::models::ExtractedSkills;

#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: i64,
    pub filename: String,
    /// Object key in the resume bucket (`resumes/{uuid}_{name}`).
    pub storage_key: String,
    pub extracted_text: String,
    pub extracted_skills: Json<ExtractedSkills>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ResumeSummaryRow {
    pub id: i64,
    pub filename: String,
    pub created_at: DateTime<Utc>,
}
