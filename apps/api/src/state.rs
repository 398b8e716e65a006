use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::analysis::scoring::ScoreComposer;
use crate::auth::session::SessionStore;
use crate::config::Config;
use crate::events::EventBus;
use crate::extraction::strategy::SkillPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub sessions: SessionStore,
    pub events: EventBus,
    /// Skill extraction: optional LLM primary, keyword extractor fallback.
    pub skills: Arc<SkillPipeline>,
    /// Scoring: optional LLM primary, heuristic fallback.
    pub scorer: Arc<ScoreComposer>,
    pub config: Config,
}
