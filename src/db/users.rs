use crate::db::models::DbUser;
use crate::db::sqlite::SqlitePool;
use crate::error::LedgerError;

#[derive(Clone)]
pub struct UsersStorage {
    pool: SqlitePool,
}

impl UsersStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<DbUser>, LedgerError> {
        let user = sqlx::query_as::<_, DbUser>(
            "SELECT id, username, password FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Insert a new user and return its row id.
    /// A UNIQUE violation on `username` surfaces as `DuplicateUsername`.
    pub async fn insert(&self, username: &str, password_hash: &str) -> Result<i64, LedgerError> {
        let res = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await;

        match res {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(LedgerError::DuplicateUsername)
            }
            Err(e) => Err(e.into()),
        }
    }
}
