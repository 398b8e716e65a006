use sqlx::FromRow;

/// Credentials row; never leaves the auth handlers. Responses carry a `SessionUser`.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
}
