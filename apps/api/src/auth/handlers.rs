use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{AppendHeaders, IntoResponse},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::session::{SessionStore, SessionUser};
use crate::auth::CurrentSession;
use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct SignupResponse {
    pub success: bool,
    pub user_id: i64,
    pub email: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: SessionUser,
    pub session_token: String,
}

const DUPLICATE_EMAIL: &str = "User with that email already exists";

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// A concurrent signup can pass the existence check and still hit the UNIQUE index.
fn signup_insert_error(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Validation(DUPLICATE_EMAIL.to_string())
        }
        other => AppError::Database(other),
    }
}

/// POST /api/v1/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, AppError> {
    let email = normalize_email(&req.email);
    if email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "email and password required".to_string(),
        ));
    }

    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Validation(DUPLICATE_EMAIL.to_string()));
    }

    let password_hash = hash_password(&req.password).await?;
    let name = req
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let user_id: i64 = sqlx::query_scalar(
        "INSERT INTO users (email, name, password_hash) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&email)
    .bind(name)
    .bind(password_hash)
    .fetch_one(&state.db)
    .await
    .map_err(signup_insert_error)?;

    info!("Registered user {user_id}");
    Ok(Json(SignupResponse {
        success: true,
        user_id,
        email,
    }))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = normalize_email(&req.email);
    let user: Option<UserRow> = sqlx::query_as(
        "SELECT id, email, name, password_hash FROM users WHERE email = $1",
    )
    .bind(&email)
    .fetch_optional(&state.db)
    .await?;

    let invalid = || AppError::Validation("Invalid credentials".to_string());
    let user = user.ok_or_else(invalid)?;
    if !verify_password(&req.password, &user.password_hash).await {
        return Err(invalid());
    }

    let session_user = SessionUser {
        user_id: user.id,
        email: user.email,
        name: user.name,
    };
    let token = state.sessions.create(&session_user).await?;
    info!("User {} logged in", session_user.user_id);

    Ok((
        AppendHeaders([(header::SET_COOKIE, state.sessions.cookie(&token))]),
        Json(LoginResponse {
            success: true,
            user: session_user,
            session_token: token,
        }),
    ))
}

/// POST /api/v1/auth/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
) -> Result<impl IntoResponse, AppError> {
    state.sessions.destroy(&session.token).await?;
    info!("User {} logged out", session.user.user_id);
    Ok((
        StatusCode::NO_CONTENT,
        AppendHeaders([(header::SET_COOKIE, SessionStore::clear_cookie())]),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_normalized() {
        assert_eq!(normalize_email("  Jane.Doe@Example.COM "), "jane.doe@example.com");
    }

    #[derive(Debug)]
    struct UniqueViolation;

    impl std::fmt::Display for UniqueViolation {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("duplicate key value violates unique constraint \"users_email_key\"")
        }
    }

    impl std::error::Error for UniqueViolation {}

    impl sqlx::error::DatabaseError for UniqueViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn code(&self) -> Option<std::borrow::Cow<'_, str>> {
            Some("23505".into())
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }
    }

    #[test]
    fn test_racing_signup_maps_to_duplicate_email() {
        let err = signup_insert_error(sqlx::Error::Database(Box::new(UniqueViolation)));
        match err {
            AppError::Validation(msg) => assert_eq!(msg, DUPLICATE_EMAIL),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_other_insert_errors_stay_database_errors() {
        let err = signup_insert_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::Database(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn test_login_response_exposes_no_credentials() {
        let row = UserRow {
            id: 3,
            email: "a@b.c".to_string(),
            name: Some("Ada".to_string()),
            password_hash: "$argon2id$v=19$secret".to_string(),
        };
        let response = LoginResponse {
            success: true,
            user: SessionUser {
                user_id: row.id,
                email: row.email,
                name: row.name,
            },
            session_token: "tok".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
        assert!(json.contains(r#""user_id":3"#));
    }

    #[test]
    fn test_signup_request_fields_optional_in_json() {
        let req: SignupRequest = serde_json::from_str(r#"{"email": "a@b.c"}"#).unwrap();
        assert_eq!(req.password, "");
        assert!(req.name.is_none());
    }
}
