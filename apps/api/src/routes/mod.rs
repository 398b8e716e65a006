pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_analyze_match;
use crate::auth::{handlers as auth, require_session};
use crate::events::handle_stream;
use crate::insights::handlers as insights;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/auth/signup", post(auth::handle_signup))
        .route("/api/v1/auth/login", post(auth::handle_login));

    let protected = Router::new()
        .route("/api/v1/auth/logout", post(auth::handle_logout))
        // Resumes
        .route(
            "/api/v1/resumes",
            post(resumes::handle_upload).get(resumes::handle_list_resumes),
        )
        .route("/api/v1/resumes/:id", get(resumes::handle_get_resume))
        .route(
            "/api/v1/resumes/:id/analysis",
            get(insights::handle_resume_analysis),
        )
        .route("/api/v1/resumes/:id/download", get(resumes::handle_download))
        // Matching and insights
        .route("/api/v1/analyze-match", post(handle_analyze_match))
        .route("/api/v1/roadmap", get(insights::handle_roadmap))
        .route(
            "/api/v1/interview-questions",
            get(insights::handle_interview_questions),
        )
        // Live updates
        .route("/api/v1/stream", get(handle_stream))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    public
        .merge(protected)
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .with_state(state)
}
