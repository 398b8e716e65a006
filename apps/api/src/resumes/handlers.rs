use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::events::SkillEvent;
use crate::extraction::models::ExtractedSkills;
use crate::extraction::text::{extract_text_from_upload, DocumentFormat};
use crate::llm_client::truncate_chars;
use crate::models::resume::ResumeSummaryRow;
use crate::resumes::repository::{self, NewResume};
use crate::resumes::storage::{
    cleanup_on_error, delete_object, get_object, object_key, put_object, sanitize_filename,
    saved_name,
};
use crate::state::AppState;

const PREVIEW_CHARS: usize = 500;

#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub resume_id: i64,
    pub filename: String,
    pub saved_filename: String,
    pub extracted_skills: ExtractedSkills,
    pub text_preview: String,
}

#[derive(Serialize)]
pub struct ResumeListResponse {
    pub resumes: Vec<ResumeSummaryRow>,
}

#[derive(Serialize)]
pub struct ResumeDetail {
    pub id: i64,
    pub filename: String,
    pub extracted_text: String,
    pub extracted_skills: ExtractedSkills,
}

struct UploadedFile {
    filename: String,
    content_type: Option<String>,
    data: Bytes,
}

/// Pulls the `file` field out of the multipart body; other fields are ignored.
async fn read_file_field(multipart: &mut Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(AppError::Validation("No file selected".to_string()));
        }
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        return Ok(UploadedFile {
            filename,
            content_type,
            data,
        });
    }
    Err(AppError::Validation("No file provided".to_string()))
}

/// POST /api/v1/resumes
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let upload = read_file_field(&mut multipart).await?;

    let filename = sanitize_filename(&upload.filename);
    let saved_filename = saved_name(&filename);
    let storage_key = object_key(&saved_filename);

    put_object(
        &state.s3,
        &state.config.s3_bucket,
        &storage_key,
        upload.data.clone(),
        upload.content_type.as_deref(),
    )
    .await?;

    let text = extract_text_from_upload(&filename, upload.data).await;
    let skills = state.skills.resolve(&text).await;

    let inserted = repository::insert(
        &state.db,
        NewResume {
            filename: &filename,
            storage_key: &storage_key,
            extracted_text: &text,
            extracted_skills: &skills,
        },
    )
    .await;
    // No record means nothing will ever reference the stored object.
    let (s3, bucket, key) = (&state.s3, &state.config.s3_bucket, &storage_key);
    let resume_id = cleanup_on_error(inserted, || async move {
        if let Err(e) = delete_object(s3, bucket, key).await {
            warn!("Orphaned upload left behind: {e}");
        }
    })
    .await?;

    let counts = skills.counts();
    info!(
        resume_id,
        technical = counts.technical,
        soft = counts.soft,
        certifications = counts.certifications,
        "Resume {filename} processed"
    );

    state.events.publish(SkillEvent::ResumeUploaded {
        resume_id,
        filename: filename.clone(),
        saved_filename: saved_filename.clone(),
    });

    Ok(Json(UploadResponse {
        success: true,
        resume_id,
        filename,
        saved_filename,
        extracted_skills: skills,
        text_preview: truncate_chars(&text, PREVIEW_CHARS).to_string(),
    }))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<ResumeListResponse>, AppError> {
    let resumes = repository::list(&state.db).await?;
    Ok(Json(ResumeListResponse { resumes }))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ResumeDetail>, AppError> {
    let row = repository::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    Ok(Json(ResumeDetail {
        id: row.id,
        filename: row.filename,
        extracted_text: row.extracted_text,
        extracted_skills: row.extracted_skills.0,
    }))
}

/// GET /api/v1/resumes/:id/download
/// Streams back the stored upload under its original (sanitized) name.
pub async fn handle_download(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let row = repository::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    let data = get_object(&state.s3, &state.config.s3_bucket, &row.storage_key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("File for resume {id} not found")))?;

    let content_type = match DocumentFormat::from_path(std::path::Path::new(&row.filename)) {
        DocumentFormat::Pdf => "application/pdf",
        DocumentFormat::PlainText => "text/plain; charset=utf-8",
        DocumentFormat::Unsupported => "application/octet-stream",
    };

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", row.filename),
            ),
        ],
        data,
    ))
}
