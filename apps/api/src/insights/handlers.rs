use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::events::SkillEvent;
use crate::insights::interview::{interview_questions, InterviewQuestion};
use crate::insights::report::ResumeAnalysis;
use crate::insights::roadmap::{default_roadmap, roadmap_for, Roadmap};
use crate::resumes::repository;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ResumeQuery {
    pub resume_id: Option<i64>,
}

#[derive(Serialize)]
pub struct InterviewResponse {
    pub questions: Vec<InterviewQuestion>,
}

/// GET /api/v1/resumes/:id/analysis
pub async fn handle_resume_analysis(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ResumeAnalysis>, AppError> {
    let row = repository::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    let skills = row.extracted_skills.0;
    let score = state.scorer.resolve(&skills).await;
    Ok(Json(ResumeAnalysis::new(row.id, row.filename, skills, score)))
}

/// GET /api/v1/roadmap?resume_id=
pub async fn handle_roadmap(
    State(state): State<AppState>,
    Query(params): Query<ResumeQuery>,
) -> Result<Json<Roadmap>, AppError> {
    let Some(row) = repository::find(&state.db, params.resume_id).await? else {
        return Ok(Json(default_roadmap()));
    };

    let roadmap = roadmap_for(&row.extracted_skills.technical_skills);
    state
        .events
        .publish(SkillEvent::RoadmapUpdated { resume_id: row.id });
    Ok(Json(roadmap))
}

/// GET /api/v1/interview-questions?resume_id=
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    Query(params): Query<ResumeQuery>,
) -> Result<Json<InterviewResponse>, AppError> {
    let Some(row) = repository::find(&state.db, params.resume_id).await? else {
        return Ok(Json(InterviewResponse {
            questions: interview_questions(None),
        }));
    };

    let questions = interview_questions(Some(&row.extracted_skills.technical_skills));
    state
        .events
        .publish(SkillEvent::InterviewUpdated { resume_id: row.id });
    Ok(Json(InterviewResponse { questions }))
}
