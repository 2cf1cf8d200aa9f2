use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    // Ensure data directory exists
    if let Some(parent) = database_dir(database_url) {
        std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
    }

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// Single-connection in-memory database with migrations applied.
///
/// One connection only: every new `:memory:` connection would see an empty database.
pub async fn memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

fn database_dir(database_url: &str) -> Option<&Path> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    Path::new(path).parent().filter(|p| !p.as_os_str().is_empty())
}

async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("mood-diary-db-{}-{}", name, std::process::id()))
    }

    #[test]
    fn database_dir_of_urls() {
        assert_eq!(database_dir("sqlite:data/mood.db"), Some(Path::new("data")));
        assert_eq!(database_dir("sqlite://data/mood.db?mode=rwc"), Some(Path::new("data")));
        assert_eq!(database_dir("sqlite::memory:"), None);
        assert_eq!(database_dir("sqlite:mood.db"), None);
        assert_eq!(database_dir("postgres://x"), None);
    }

    #[tokio::test]
    async fn init_pool_creates_missing_directory() {
        let root = scratch_dir("create");
        let url = format!("sqlite:{}", root.join("nested").join("mood.db").display());

        let pool = init_pool(&url).await.unwrap();
        pool.close().await;
        assert!(root.join("nested").is_dir());
        std::fs::remove_dir_all(&root).ok();
    }

    #[tokio::test]
    async fn init_pool_reports_directory_failure() {
        let blocker = scratch_dir("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let url = format!("sqlite:{}", blocker.join("sub").join("mood.db").display());

        let err = init_pool(&url).await.unwrap_err();
        assert!(matches!(err, sqlx::Error::Io(_)));
        std::fs::remove_file(&blocker).ok();
    }
}
