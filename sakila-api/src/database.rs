//! Database connection pool management, migrations and seed data

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::error::{sanitize_url, DatabaseError, DatabaseOperation, Result};
use crate::models::DEFAULT_LANGUAGES;

/// Create a PostgreSQL connection pool with retry logic
///
/// Retries `max_retries` times with exponential backoff starting at
/// `retry_delay_secs`.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let mut attempt = 0;
    let base_delay = Duration::from_secs(config.retry_delay_secs);

    loop {
        match try_create_pool(config).await {
            Ok(pool) => {
                if attempt > 0 {
                    tracing::info!(
                        "Database connection established after {} attempt(s)",
                        attempt + 1
                    );
                } else {
                    tracing::info!(
                        "Database connection pool created: max={}, min={}",
                        config.max_connections,
                        config.min_connections
                    );
                }
                return Ok(pool);
            }
            Err(e) => {
                attempt += 1;

                if attempt > config.max_retries || !e.is_retriable() {
                    tracing::error!(
                        "Failed to connect to database after {} attempt(s): {}",
                        attempt,
                        e
                    );
                    return Err(e.into());
                }

                let delay = backoff_delay(base_delay, attempt);
                tracing::warn!(
                    "Database connection attempt {} failed: {}. Retrying in {:?}...",
                    attempt,
                    e,
                    delay
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Delay before retry number `attempt` (1-based)
fn backoff_delay(base_delay: Duration, attempt: u32) -> Duration {
    let multiplier = 2_u32.saturating_pow(attempt.saturating_sub(1));
    base_delay.saturating_mul(multiplier)
}

/// Attempt to create a database pool (single try)
async fn try_create_pool(config: &DatabaseConfig) -> std::result::Result<PgPool, DatabaseError> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| {
            let mut error = DatabaseError::from(e);
            error.operation = DatabaseOperation::Connect;
            error.add_context(format!("url: {}", sanitize_url(&config.url)))
        })
}

/// Apply pending migrations from `migrations/`
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Insert the default languages if the `languages` table is empty
///
/// Returns the number of rows inserted.
pub async fn seed_languages(pool: &PgPool) -> Result<u64> {
    let inserted = sqlx::query(
        "INSERT INTO languages (name) \
         SELECT seed.name FROM UNNEST($1::text[]) WITH ORDINALITY AS seed(name, ord) \
         WHERE NOT EXISTS (SELECT 1 FROM languages) \
         ORDER BY seed.ord",
    )
    .bind(DEFAULT_LANGUAGES.as_slice())
    .execute(pool)
    .await
    .map_err(|e| {
        let mut error = DatabaseError::from(e);
        error.operation = DatabaseOperation::Seed;
        error
    })?
    .rows_affected();

    if inserted > 0 {
        tracing::info!(count = inserted, "Seeded default languages");
    } else {
        tracing::debug!("Languages already present, skipping seed");
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_delay_doubles() {
        let base = Duration::from_secs(2);
        assert_eq!(backoff_delay(base, 1), Duration::from_secs(2));
        assert_eq!(backoff_delay(base, 2), Duration::from_secs(4));
        assert_eq!(backoff_delay(base, 3), Duration::from_secs(8));
    }

    #[test]
    fn test_backoff_delay_saturates() {
        let delay = backoff_delay(Duration::from_secs(2), 200);
        assert_eq!(delay, Duration::from_secs(2).saturating_mul(u32::MAX));
    }
}
