use crate::db::sqlite::SqlitePool;
use crate::db::users::UsersStorage;
use crate::error::LedgerError;
use crate::service::password::{hash_password, verify_against_dummy, verify_password};
use crate::types::User;
use tracing::{debug, info};

pub const MIN_PASSWORD_LEN: usize = 4;

/// Account registration and login over the `users` table.
#[derive(Clone)]
pub struct AccountStore {
    storage: UsersStorage,
}

impl AccountStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            storage: UsersStorage::new(pool),
        }
    }

    /// Create an account. Username and password are trimmed first.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, LedgerError> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() {
            return Err(LedgerError::invalid_input("Username must not be empty."));
        }
        if self.storage.find_by_username(username).await?.is_some() {
            debug!(username = %username, "registration rejected: username taken");
            return Err(LedgerError::DuplicateUsername);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(LedgerError::InvalidPassword);
        }

        let password = password.to_owned();
        let hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;
        let id = self.storage.insert(username, &hash).await?;

        info!(user_id = id, username = %username, "account registered");
        Ok(User {
            id,
            username: username.to_string(),
        })
    }

    /// Resolve a username/password pair to its account.
    /// Unknown users and wrong passwords both yield `InvalidCredentials`.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, LedgerError> {
        let username = username.trim();
        let password = password.trim().to_owned();

        let Some(row) = self.storage.find_by_username(username).await? else {
            tokio::task::spawn_blocking(move || verify_against_dummy(&password)).await?;
            info!(username = %username, "login failed: unknown user");
            return Err(LedgerError::InvalidCredentials);
        };

        let stored = row.password.clone();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&password, &stored)).await??;
        if !matches {
            info!(username = %username, "login failed: wrong password");
            return Err(LedgerError::InvalidCredentials);
        }

        info!(user_id = row.id, username = %username, "login succeeded");
        Ok(row.into())
    }

    /// Create the account if it does not exist yet; an existing account is
    /// left untouched. Returns true when a new account was created.
    pub async fn ensure_account(&self, username: &str, password: &str) -> Result<bool, LedgerError> {
        match self.register(username, password).await {
            Ok(_) => Ok(true),
            Err(LedgerError::DuplicateUsername) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
