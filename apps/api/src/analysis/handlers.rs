//! Axum route handlers for the Analysis API.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::analysis::matching::{analyze_match, MatchResult};
use crate::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct AnalyzeMatchRequest {
    #[serde(default)]
    pub candidate_skills: Vec<String>,
    #[serde(default)]
    pub job_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeMatchResponse {
    pub success: bool,
    pub match_analysis: MatchResult,
}

/// POST /api/v1/analyze-match
pub async fn handle_analyze_match(
    Json(request): Json<AnalyzeMatchRequest>,
) -> Result<Json<AnalyzeMatchResponse>, AppError> {
    let match_analysis = analyze_match(&request.candidate_skills, &request.job_skills);
    Ok(Json(AnalyzeMatchResponse {
        success: true,
        match_analysis,
    }))
}
