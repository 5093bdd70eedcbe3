use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use time::Duration;
use tracing::debug;

use crate::error::LedgerError;

pub const SESSION_COOKIE: &str = "ledger_session";

/// Upper bound for the configured session lifetime (one year).
pub const MAX_SESSION_TTL_MINUTES: i64 = 365 * 24 * 60;

/// Cookie settings shared by login and logout.
#[derive(Debug, Clone, Copy)]
pub struct SessionPolicy {
    pub secure: bool,
    pub ttl: Duration,
}

/// Payload sealed inside the private session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub username: String,
    /// Unix timestamp (seconds) after which the session is rejected.
    pub expires_at: i64,
}

impl SessionClaims {
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

impl SessionPolicy {
    /// TTL is clamped to `1..=MAX_SESSION_TTL_MINUTES`.
    pub fn new(secure: bool, ttl_minutes: i64) -> Self {
        Self {
            secure,
            ttl: Duration::minutes(ttl_minutes.clamp(1, MAX_SESSION_TTL_MINUTES)),
        }
    }

    pub fn build_cookie(&self, username: &str) -> Cookie<'static> {
        let claims = SessionClaims {
            username: username.to_string(),
            expires_at: Utc::now().timestamp() + self.ttl.whole_seconds(),
        };
        self.cookie_for(&claims)
    }

    pub fn cookie_for(&self, claims: &SessionClaims) -> Cookie<'static> {
        // serializing a struct of a String and an i64 cannot fail
        let value = serde_json::to_string(claims).unwrap_or_default();
        Cookie::build(Cookie::new(SESSION_COOKIE, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(self.ttl)
            .build()
    }

    pub fn clear_cookie(&self) -> Cookie<'static> {
        Cookie::build(Cookie::new(SESSION_COOKIE, ""))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build()
    }
}

/// Extractor that requires a logged-in, unexpired session.
/// The private jar decrypts and authenticates the cookie, so its claims can
/// be trusted as the ones set at login.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub username: String,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = LedgerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never: Infallible| match never {});

        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Err(LedgerError::Unauthenticated);
        };
        let Ok(claims) = serde_json::from_str::<SessionClaims>(cookie.value()) else {
            return Err(LedgerError::Unauthenticated);
        };
        if claims.username.is_empty() || claims.is_expired(Utc::now().timestamp()) {
            debug!(username = %claims.username, "session claims rejected");
            return Err(LedgerError::Unauthenticated);
        }
        Ok(Self {
            username: claims.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_is_clamped_to_a_representable_range() {
        let huge = SessionPolicy::new(true, i64::MAX);
        assert_eq!(huge.ttl, Duration::minutes(MAX_SESSION_TTL_MINUTES));

        let tiny = SessionPolicy::new(true, -5);
        assert_eq!(tiny.ttl, Duration::minutes(1));
    }

    #[test]
    fn claims_expire_at_their_deadline() {
        let claims = SessionClaims {
            username: "a".to_string(),
            expires_at: 100,
        };
        assert!(!claims.is_expired(99));
        assert!(claims.is_expired(100));
    }

    #[test]
    fn cookie_carries_expiry_claims() {
        let policy = SessionPolicy::new(false, 30);
        let cookie = policy.build_cookie("shopkeeper");
        let claims: SessionClaims = serde_json::from_str(cookie.value()).unwrap();
        assert_eq!(claims.username, "shopkeeper");
        let remaining = claims.expires_at - Utc::now().timestamp();
        assert!((1700..=1800).contains(&remaining));
    }
}
