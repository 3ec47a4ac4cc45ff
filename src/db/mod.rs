pub mod submissions;

use sqlx::PgPool;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("DATABASE_URL is not set")]
    NotConfigured,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

const CREATE_SUBMISSIONS_TABLE: &str = "CREATE TABLE IF NOT EXISTS submissions (
    id UUID PRIMARY KEY,
    company_name TEXT NOT NULL,
    address TEXT NOT NULL,
    representative_name TEXT NOT NULL,
    email TEXT NOT NULL,
    contact_number TEXT NOT NULL,
    app_software_name TEXT,
    amount TEXT NOT NULL,
    reference_number TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)";

// Older deployments created the table before the application name existed.
const ADD_APP_SOFTWARE_NAME: &str =
    "ALTER TABLE submissions ADD COLUMN IF NOT EXISTS app_software_name TEXT";

/// Create the submissions table and bring older copies of it up to date.
/// Safe to run on every startup.
pub async fn init_schema(pool: &PgPool) -> Result<(), StoreError> {
    let mut tx = pool.begin().await?;
    sqlx::query(CREATE_SUBMISSIONS_TABLE).execute(&mut *tx).await?;
    sqlx::query(ADD_APP_SOFTWARE_NAME).execute(&mut *tx).await?;
    tx.commit().await?;
    Ok(())
}
