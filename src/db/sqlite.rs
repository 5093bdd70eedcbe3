use crate::db::schema::SQLITE_INIT;
use crate::error::LedgerError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::info;

pub type SqlitePool = Pool<Sqlite>;

/// Open (creating if missing) the database behind `database_url` and make
/// sure the schema exists.
pub async fn connect(database_url: &str) -> Result<SqlitePool, LedgerError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
    init_schema(&pool).await?;
    info!(database_url = %database_url, "ledger database ready");
    Ok(pool)
}

/// Initialize the schema by executing the bundled DDL.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), LedgerError> {
    // sqlx::query runs a single statement, so split the bundle ourselves
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
