use clothing_ledger::{AccountStore, LedgerError};
use sqlx::Row;
use tempfile::TempDir;

async fn open_store() -> (TempDir, AccountStore, clothing_ledger::db::SqlitePool) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let database_url = format!("sqlite:{}", dir.path().join("accounts.sqlite").display());
    let pool = clothing_ledger::db::connect(&database_url)
        .await
        .expect("failed to open database");
    (dir, AccountStore::new(pool.clone()), pool)
}

#[tokio::test]
async fn register_enforces_password_length_and_uniqueness() {
    let (_dir, store, _pool) = open_store().await;

    let err = store.register("a", "abc").await.unwrap_err();
    assert!(matches!(err, LedgerError::InvalidPassword));

    let user = store.register("a", "abcd").await.expect("register failed");
    assert_eq!(user.username, "a");

    let err = store.register("a", "something-else").await.unwrap_err();
    assert!(matches!(err, LedgerError::DuplicateUsername));

    // duplicate check wins over the length check
    let err = store.register("a", "x").await.unwrap_err();
    assert!(matches!(err, LedgerError::DuplicateUsername));
}

#[tokio::test]
async fn register_rejects_blank_username() {
    let (_dir, store, _pool) = open_store().await;
    let err = store.register("   ", "abcd").await.unwrap_err();
    assert!(matches!(err, LedgerError::InvalidInput(_)));
}

#[tokio::test]
async fn authenticate_requires_exact_match() {
    let (_dir, store, _pool) = open_store().await;
    let registered = store.register("alice", "Secret1").await.unwrap();

    let user = store.authenticate("alice", "Secret1").await.unwrap();
    assert_eq!(user, registered);

    for (username, password) in [
        ("alice", "secret1"),
        ("alice", "Secret"),
        ("Alice", "Secret1"),
        ("bob", "Secret1"),
        ("alice", ""),
    ] {
        let err = store.authenticate(username, password).await.unwrap_err();
        assert!(
            matches!(err, LedgerError::InvalidCredentials),
            "{username}/{password} should be rejected"
        );
    }
}

#[tokio::test]
async fn surrounding_whitespace_is_trimmed() {
    let (_dir, store, _pool) = open_store().await;
    store.register("  carol ", " pass1234 ").await.unwrap();
    let user = store.authenticate("carol", "pass1234").await.unwrap();
    assert_eq!(user.username, "carol");
}

#[tokio::test]
async fn stored_password_is_hashed() {
    let (_dir, store, pool) = open_store().await;
    store.register("dave", "hunter22").await.unwrap();

    let row = sqlx::query("SELECT password FROM users WHERE username = ?")
        .bind("dave")
        .fetch_one(&pool)
        .await
        .unwrap();
    let stored: String = row.get("password");
    assert_ne!(stored, "hunter22");
    assert!(stored.starts_with("$argon2"));
}

#[tokio::test]
async fn ensure_account_is_idempotent() {
    let (_dir, store, _pool) = open_store().await;
    assert!(store.ensure_account("admin", "password123").await.unwrap());
    assert!(!store.ensure_account("admin", "other-password").await.unwrap());

    // the original password still works
    store.authenticate("admin", "password123").await.unwrap();
}
