use anyhow::Context;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};

use crate::config::DbConfig;

/// Opens the connection pool, pinning `search_path` when a schema is configured.
pub async fn connect(cfg: &DbConfig) -> anyhow::Result<PgPool> {
    let mut options: PgConnectOptions = cfg.url.parse().context("parse DATABASE_URL")?;
    if let Some(schema) = &cfg.schema {
        options = options.options([("search_path", schema.as_str())]);
    }

    let pool = PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .connect_with(options)
        .await
        .context("connect to database")?;

    tracing::debug!(
        max_connections = cfg.max_connections,
        schema = cfg.schema.as_deref().unwrap_or("<default>"),
        "database pool ready"
    );
    Ok(pool)
}

/// Server version string as reported by `SELECT version()`.
pub async fn server_version(db: &PgPool) -> Result<String, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT version()")
        .fetch_one(db)
        .await
}
