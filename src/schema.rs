use sqlx::PgPool;
use tracing::{debug, info, instrument};

use crate::error::Result;

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id         SERIAL PRIMARY KEY,
        username   VARCHAR(50)  NOT NULL UNIQUE,
        name       VARCHAR(100) NOT NULL,
        lastname   VARCHAR(100) NOT NULL,
        email      VARCHAR(255) NOT NULL UNIQUE,
        password   VARCHAR(255) NOT NULL,
        created_at TIMESTAMPTZ  NOT NULL DEFAULT now()
    )
"#;

// Case-insensitive: backs LOWER(email) lookups and rejects duplicates differing only in case.
const CREATE_EMAIL_INDEX: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users (LOWER(email))";

pub const EMAIL_INDEX: &str = "idx_users_email";

/// Whether the `users` table exists in the connection's current schema.
pub async fn users_table_exists(db: &PgPool) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1
              FROM information_schema.tables
             WHERE table_schema = current_schema()
               AND table_name = 'users'
        )
        "#,
    )
    .fetch_one(db)
    .await?;
    Ok(exists)
}

/// Creates the `users` table and its email index unless they already exist.
#[instrument(skip(db), err)]
pub async fn ensure_schema(db: &PgPool) -> Result<()> {
    if users_table_exists(db).await? {
        debug!("users table present");
        return Ok(());
    }

    let mut tx = db.begin().await?;
    sqlx::query(CREATE_USERS).execute(&mut *tx).await?;
    sqlx::query(CREATE_EMAIL_INDEX).execute(&mut *tx).await?;
    tx.commit().await?;

    info!("users table and {} created", EMAIL_INDEX);
    Ok(())
}
