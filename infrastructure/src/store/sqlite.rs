use consult_domain::StoreError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

pub(crate) const MEMORY_DATABASE: &str = ":memory:";

pub(crate) fn backend(error: sqlx::Error) -> StoreError {
    StoreError::Backend(error.to_string())
}

/// Open the database and create the schema if missing.
///
/// `:memory:` yields a single long-lived connection so every query sees
/// the same database.
pub async fn connect(database: &str) -> Result<SqlitePool, StoreError> {
    let pool = if database == MEMORY_DATABASE {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
    } else {
        let options = SqliteConnectOptions::new()
            .filename(database)
            .create_if_missing(true);
        SqlitePoolOptions::new().connect_with(options).await
    }
    .map_err(backend)?;

    init(&pool).await?;
    info!(database, "database ready");
    Ok(pool)
}

/// Create the tables used by the stores.
pub async fn init(pool: &SqlitePool) -> Result<(), StoreError> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS users (
            id                  INTEGER PRIMARY KEY,
            full_name           TEXT,
            phone               TEXT,
            city                TEXT,
            message_count       INTEGER NOT NULL DEFAULT 0,
            last_message_month  INTEGER,
            assigned_consultant INTEGER
        )"#,
    )
    .execute(pool)
    .await
    .map_err(backend)?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS consultants (
            id             INTEGER PRIMARY KEY,
            display_name   TEXT,
            display_handle TEXT,
            assigned_count INTEGER NOT NULL DEFAULT 0,
            answered_count INTEGER NOT NULL DEFAULT 0
        )"#,
    )
    .execute(pool)
    .await
    .map_err(backend)?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS settings (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )"#,
    )
    .execute(pool)
    .await
    .map_err(backend)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_database_keeps_schema() {
        let pool = connect(MEMORY_DATABASE).await.unwrap();
        init(&pool).await.unwrap();

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'consultants', 'settings')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_file_database_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("router.db");
        let pool = connect(path.to_str().unwrap()).await.unwrap();
        pool.close().await;
        assert!(path.exists());
    }
}
