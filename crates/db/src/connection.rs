use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub type DbPool = sqlx::SqlitePool;

/// Database files are created on first use. In-memory databases are pinned to
/// a single long-lived connection, since each SQLite connection would
/// otherwise see its own empty database. `timeout_secs` bounds both pool
/// acquisition and waiting on a locked database.
pub async fn connect_with_settings(
    database_url: &str,
    max_connections: u32,
    timeout_secs: u64,
) -> Result<DbPool, sqlx::Error> {
    let timeout = Duration::from_secs(timeout_secs.max(1));
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(timeout);

    let pool_options = SqlitePoolOptions::new().acquire_timeout(timeout);
    let pool_options = if is_memory_url(database_url) {
        pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        pool_options.max_connections(max_connections.max(1))
    };

    pool_options.connect_with(options).await
}

pub fn is_memory_url(database_url: &str) -> bool {
    let url = database_url.trim();
    url == ":memory:" || url.starts_with("sqlite::memory:") || url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use sqlx::Row;

    use super::{connect_with_settings, is_memory_url};

    #[test]
    fn memory_urls_are_detected() {
        assert!(is_memory_url("sqlite::memory:"));
        assert!(is_memory_url(":memory:"));
        assert!(is_memory_url("sqlite://board?mode=memory&cache=shared"));
        assert!(!is_memory_url("sqlite://pipeboard.db"));
    }

    #[tokio::test]
    async fn creates_missing_database_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("fresh.db");
        let url = format!("sqlite://{}", path.display());

        let pool = connect_with_settings(&url, 2, 5).await.expect("connect");
        pool.close().await;

        assert!(path.exists());
    }

    #[tokio::test]
    async fn busy_timeout_follows_configured_timeout() {
        let pool = connect_with_settings("sqlite::memory:", 1, 7).await.expect("connect");

        let busy_timeout_ms = sqlx::query("PRAGMA busy_timeout")
            .fetch_one(&pool)
            .await
            .expect("read busy_timeout")
            .get::<i64, _>(0);

        assert_eq!(busy_timeout_ms, 7_000);
        pool.close().await;
    }
}
