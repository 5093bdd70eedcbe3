//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and conversions
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `users.rs` / `sales.rs`: per-table storage handles over a shared pool

pub mod models;
pub mod sales;
pub mod schema;
pub mod sqlite;
pub mod users;

pub use models::DbUser;
pub use sales::SalesStorage;
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, connect};
pub use users::UsersStorage;
