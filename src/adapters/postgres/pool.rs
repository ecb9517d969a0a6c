//! Connection pool construction.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;

use crate::config::DatabaseConfig;

/// Builds a pool that opens connections on first use.
///
/// An unreachable server does not fail here; the first query (or the health
/// check's ping) reports it. `database.name`, when set, replaces the database
/// named in the URL.
pub fn connect_lazy(url: &str, config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let mut options = PgConnectOptions::from_str(url)?;
    if let Some(name) = config.name.as_deref().filter(|n| !n.is_empty()) {
        options = options.database(name);
    }

    Ok(PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_lazy_with(options))
}
