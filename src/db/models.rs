use crate::types::User;
use sqlx::FromRow;

/// Row of the `users` table, including the stored password hash.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub username: String,
    pub password: String,
}

impl From<DbUser> for User {
    fn from(d: DbUser) -> Self {
        User {
            id: d.id,
            username: d.username,
        }
    }
}
