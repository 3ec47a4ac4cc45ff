use std::sync::Arc;

use axum_extra::extract::cookie::Key;
use sqlx::PgPool;

use crate::config::Config;
use crate::db::StoreError;
use crate::email::VerificationMailer;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pool: Option<PgPool>,
    pub config: Config,
    pub mailer: VerificationMailer,
    pub cookie_key: Key,
}

impl AppState {
    pub fn new(pool: Option<PgPool>, config: Config) -> Self {
        let mailer = VerificationMailer::new(config.mail.clone());
        let cookie_key = crate::crypto::cookie_key(&config.secret_key);
        Self {
            pool,
            config,
            mailer,
            cookie_key,
        }
    }

    /// The connection pool, or `NotConfigured` when the process was started
    /// without `DATABASE_URL`.
    pub fn pool(&self) -> Result<&PgPool, StoreError> {
        self.pool.as_ref().ok_or(StoreError::NotConfigured)
    }
}
