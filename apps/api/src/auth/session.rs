//! Opaque session tokens stored in Redis with a TTL.
//!
//! Clients present the token either as `Authorization: Bearer <token>` or in the
//! session cookie set at login.

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;

pub const SESSION_COOKIE: &str = "skillmatch_session";
const KEY_PREFIX: &str = "session:";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: i64,
    pub email: String,
    pub name: Option<String>,
}

#[derive(Clone)]
pub struct SessionStore {
    redis: redis::Client,
    ttl_secs: u64,
}

impl SessionStore {
    pub fn new(redis: redis::Client, ttl_secs: u64) -> Self {
        Self { redis, ttl_secs }
    }

    fn key(token: &str) -> String {
        format!("{KEY_PREFIX}{token}")
    }

    /// Stores `user` under a fresh random token and returns the token.
    pub async fn create(&self, user: &SessionUser) -> Result<String, AppError> {
        let token = Uuid::new_v4().simple().to_string();
        let value = serde_json::to_string(user).map_err(|e| AppError::Internal(e.into()))?;

        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        redis::cmd("SET")
            .arg(Self::key(&token))
            .arg(value)
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async::<_, ()>(&mut conn)
            .await?;

        debug!("Session created for user {}", user.user_id);
        Ok(token)
    }

    /// `None` for unknown or expired tokens.
    pub async fn get(&self, token: &str) -> Result<Option<SessionUser>, AppError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let value: Option<String> = redis::cmd("GET")
            .arg(Self::key(token))
            .query_async(&mut conn)
            .await?;

        Ok(value.and_then(|v| match serde_json::from_str(&v) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Discarding unreadable session payload: {e}");
                None
            }
        }))
    }

    pub async fn destroy(&self, token: &str) -> Result<(), AppError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        redis::cmd("DEL")
            .arg(Self::key(token))
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    pub fn cookie(&self, token: &str) -> String {
        format!(
            "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.ttl_secs
        )
    }

    pub fn clear_cookie() -> String {
        format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
    }
}

/// Bearer token first, then the session cookie.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(header::HeaderName, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_bearer_token() {
        let h = headers(&[(header::AUTHORIZATION, "Bearer abc123")]);
        assert_eq!(token_from_headers(&h).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_cookie_token() {
        let h = headers(&[(header::COOKIE, "theme=dark; skillmatch_session=tok42; lang=en")]);
        assert_eq!(token_from_headers(&h).as_deref(), Some("tok42"));
    }

    #[test]
    fn test_bearer_wins_over_cookie() {
        let h = headers(&[
            (header::COOKIE, "skillmatch_session=from-cookie"),
            (header::AUTHORIZATION, "Bearer from-header"),
        ]);
        assert_eq!(token_from_headers(&h).as_deref(), Some("from-header"));
    }

    #[test]
    fn test_missing_or_empty_token() {
        assert_eq!(token_from_headers(&HeaderMap::new()), None);
        let h = headers(&[
            (header::AUTHORIZATION, "Basic dXNlcjpwdw=="),
            (header::COOKIE, "skillmatch_session="),
        ]);
        assert_eq!(token_from_headers(&h), None);
    }

    #[test]
    fn test_cookie_strings() {
        let store = SessionStore::new(redis::Client::open("redis://127.0.0.1/").unwrap(), 3600);
        assert_eq!(
            store.cookie("t"),
            "skillmatch_session=t; Path=/; HttpOnly; SameSite=Lax; Max-Age=3600"
        );
        assert!(SessionStore::clear_cookie().contains("Max-Age=0"));
    }
}
