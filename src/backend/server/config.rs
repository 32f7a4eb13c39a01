/**
 * Server Configuration
 *
 * Backend selection and schema initialization. The choice is made once
 * at boot and never revisited:
 *
 * - `DATABASE_URL` set, or `APP_ENV=production` → PostgreSQL
 * - otherwise → the in-memory fallback (with a loud warning, since
 *   nothing survives a restart)
 *
 * A backend that cannot be reached or cannot initialize its schema is
 * fatal: the process has nothing to serve without working storage, so
 * the error propagates to `main` instead of being swallowed.
 */

use crate::backend::storage::{MemoryBackend, PostgresBackend, StorageBackend, StorageError};
use std::sync::Arc;

const DEFAULT_DATABASE_URL: &str = "postgresql://localhost:5432/teamtask";

/// True when the current environment selects the durable backend.
fn durable_backend_configured() -> bool {
    std::env::var("DATABASE_URL").is_ok()
        || std::env::var("APP_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
}

/// Select, connect, and initialize the storage backend.
pub async fn select_backend() -> Result<Arc<dyn StorageBackend>, StorageError> {
    let backend: Arc<dyn StorageBackend> = if durable_backend_configured() {
        let url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        Arc::new(PostgresBackend::connect(&url).await?)
    } else {
        tracing::warn!(
            "No DATABASE_URL configured; using the in-memory store. \
             Data will NOT survive a restart."
        );
        Arc::new(MemoryBackend::new())
    };

    backend.init_schema().await?;
    Ok(backend)
}

/// Port the server listens on (`PORT`, default 3001).
pub fn server_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001)
}

/// Whether to seed the demo account on startup.
///
/// Defaults to on for the in-memory backend (an empty dev server is
/// useless) and off whenever the durable backend is selected, by either
/// `DATABASE_URL` or `APP_ENV=production`. `SEED_DEMO_DATA` overrides
/// either way.
pub fn seed_demo_data() -> bool {
    match std::env::var("SEED_DEMO_DATA") {
        Ok(v) => matches!(v.as_str(), "1" | "true" | "yes"),
        Err(_) => !durable_backend_configured(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Process environment is global, so every mutation of these three
    // variables lives in this one test.
    #[test]
    fn test_seed_default_follows_backend_selection() {
        std::env::remove_var("SEED_DEMO_DATA");
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("APP_ENV");
        assert!(seed_demo_data(), "in-memory backend seeds by default");

        std::env::set_var("APP_ENV", "production");
        assert!(
            !seed_demo_data(),
            "production selects Postgres and must not seed by default"
        );

        std::env::set_var("SEED_DEMO_DATA", "true");
        assert!(seed_demo_data(), "explicit opt-in wins over the default");

        std::env::set_var("SEED_DEMO_DATA", "0");
        std::env::remove_var("APP_ENV");
        assert!(!seed_demo_data(), "explicit opt-out wins over the default");

        std::env::remove_var("SEED_DEMO_DATA");
    }
}
