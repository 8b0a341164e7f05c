use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Builds the connection pool from an explicit URL. Constructed once at
/// startup and handed to the server as shared state.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}
