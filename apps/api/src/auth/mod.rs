//! Email/password accounts with Redis-backed sessions.

pub mod handlers;
pub mod password;
pub mod session;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::session::{token_from_headers, SessionUser};
use crate::errors::AppError;
use crate::state::AppState;

/// The authenticated caller, available to protected handlers as an extension.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub token: String,
    pub user: SessionUser,
}

/// Rejects the request with 401 unless it carries a live session token.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = token_from_headers(request.headers()).ok_or(AppError::Unauthorized)?;
    let user = state
        .sessions
        .get(&token)
        .await?
        .ok_or(AppError::Unauthorized)?;

    request
        .extensions_mut()
        .insert(CurrentSession { token, user });
    Ok(next.run(request).await)
}
