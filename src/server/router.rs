use axum::{
    Router,
    extract::{DefaultBodyLimit, FromRef},
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use tracing::warn;

use crate::config::BasicConfig;
use crate::db::sqlite::SqlitePool;
use crate::handlers::{accounts, sales};
use crate::middleware::session::SessionPolicy;
use crate::service::{account_store::AccountStore, sales_ledger::SalesLedger};

pub const BODY_LIMIT_BYTES: usize = 16 * 1024;

/// Everything a handler may touch, injected into the router once at startup.
#[derive(Clone)]
pub struct LedgerState {
    pub accounts: AccountStore,
    pub ledger: SalesLedger,
    pub session: SessionPolicy,
    cookie_key: Key,
}

impl LedgerState {
    pub fn new(
        accounts: AccountStore,
        ledger: SalesLedger,
        session: SessionPolicy,
        cookie_key: Key,
    ) -> Self {
        Self {
            accounts,
            ledger,
            session,
            cookie_key,
        }
    }

    /// Wire both stores onto one pool, with cookie settings from `basic`.
    pub fn from_config(pool: SqlitePool, basic: &BasicConfig) -> Self {
        let session = SessionPolicy::new(!basic.insecure_cookie, basic.session_ttl_minutes);
        Self::new(
            AccountStore::new(pool.clone()),
            SalesLedger::new(pool),
            session,
            cookie_key_from_secret(&basic.cookie_secret),
        )
    }
}

impl FromRef<LedgerState> for Key {
    fn from_ref(state: &LedgerState) -> Self {
        state.cookie_key.clone()
    }
}

/// Derive the cookie key from the configured secret, or generate a random
/// one when the secret is missing or shorter than 64 bytes.
pub fn cookie_key_from_secret(secret: &str) -> Key {
    if secret.is_empty() {
        warn!("cookie_secret not set; using a random key, sessions will not survive restart");
        return Key::generate();
    }
    match Key::try_from(secret.as_bytes()) {
        Ok(key) => key,
        Err(e) => {
            warn!(error = %e, "cookie_secret unusable; using a random key");
            Key::generate()
        }
    }
}

pub fn ledger_router(state: LedgerState) -> Router {
    Router::new()
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route("/logout", post(accounts::logout))
        .route("/dashboard", get(sales::dashboard))
        .route("/sales", get(sales::history).post(sales::submit_sale))
        .route("/sales/totals", get(sales::totals))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}
