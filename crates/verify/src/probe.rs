use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("could not connect: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),
}

/// What a live connection told us about the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub server_version: String,
    /// Installed version of the `vector` extension, if any.
    pub vector_extension: Option<String>,
}

/// Open a single connection, read the server version and look for the
/// vector extension. One attempt, no retries.
pub async fn probe(database_url: &str, timeout: Duration) -> Result<ProbeResult, ProbeError> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(timeout)
        .connect(database_url)
        .await
        .map_err(ProbeError::Connect)?;

    tracing::debug!("Connected to PostgreSQL");

    let server_version: String = sqlx::query_scalar("SELECT version()")
        .fetch_one(&pool)
        .await
        .map_err(ProbeError::Query)?;

    let vector_extension: Option<String> =
        sqlx::query_scalar("SELECT extversion FROM pg_extension WHERE extname = 'vector'")
            .fetch_optional(&pool)
            .await
            .map_err(ProbeError::Query)?;

    pool.close().await;

    Ok(ProbeResult {
        server_version,
        vector_extension,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_server_is_a_connect_error() {
        let result = probe(
            "postgresql://u:p@127.0.0.1:1/db?sslmode=disable",
            Duration::from_secs(2),
        )
        .await;
        assert!(matches!(result, Err(ProbeError::Connect(_))));
    }
}
