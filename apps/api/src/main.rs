mod analysis;
mod auth;
mod config;
mod db;
mod errors;
mod events;
mod extraction;
mod insights;
mod llm_client;
mod models;
mod resumes;
mod routes;
mod state;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::analysis::scoring::{LlmScorer, ScoreComposer};
use crate::auth::session::SessionStore;
use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::events::EventBus;
use crate::extraction::catalog::SkillCatalog;
use crate::extraction::keyword::KeywordSkillExtractor;
use crate::extraction::strategy::{LlmSkillExtractor, SkillPipeline};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    // Initialize Redis (sessions)
    let redis = redis::Client::open(config.redis_url.clone())?;
    let sessions = SessionStore::new(redis, config.session_ttl_secs);
    info!("Redis session store initialized");

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    // Skill catalog: built-in lists unless a JSON file is configured
    let catalog = match &config.skill_catalog_path {
        Some(path) => SkillCatalog::from_json_file(path)?,
        None => SkillCatalog::default(),
    };
    let keyword = KeywordSkillExtractor::new(catalog, config.cert_capture);
    info!(
        "Skill catalog: {} technical, {} soft (certification capture: {:?})",
        keyword.catalog().technical().len(),
        keyword.catalog().soft().len(),
        config.cert_capture
    );

    let (skills, scorer) = build_collaborators(&config, keyword)?;
    info!("Skill extraction backend: {}", skills.primary_backend());

    let state = AppState {
        db,
        s3,
        sessions,
        events: EventBus::default(),
        skills: Arc::new(skills),
        scorer: Arc::new(scorer),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Keyword extraction and heuristic scoring always work; the LLM-backed versions are
/// placed in front of them only when switched on and an API key is available.
fn build_collaborators(
    config: &Config,
    keyword: KeywordSkillExtractor,
) -> Result<(SkillPipeline, ScoreComposer)> {
    let mut skills = SkillPipeline::new(keyword);
    let mut scorer = ScoreComposer::default();

    let Some(api_key) = config.llm_api_key() else {
        if config.llm_skills_enabled || config.llm_scoring_enabled {
            warn!("LLM collaborators enabled but ANTHROPIC_API_KEY is not set; using keyword/heuristic only");
        }
        return Ok((skills, scorer));
    };

    let llm = LlmClient::new(api_key.to_string())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    if config.llm_skills_enabled {
        skills = skills.with_primary(Arc::new(LlmSkillExtractor(llm.clone())));
    }
    if config.llm_scoring_enabled {
        scorer = scorer.with_primary(Arc::new(LlmScorer(llm)));
        info!("Scoring backend: llm (heuristic fallback)");
    }
    Ok((skills, scorer))
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "skillmatch-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
