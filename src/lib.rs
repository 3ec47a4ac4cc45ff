pub mod config;
pub mod error;
pub mod state;
pub mod db;
pub mod models;
pub mod routes;
pub mod views;
pub mod email;
pub mod submission;
pub mod qr;
pub mod flash;
pub mod crypto;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::{AppState, SharedState};

/// Build the router. Without a pool the pages still render, but every step
/// that touches storage reports that no database is configured.
pub fn build_app(pool: Option<PgPool>, config: Config) -> Router {
    if pool.is_none() {
        tracing::warn!("DATABASE_URL is not set; submissions cannot be saved");
    }
    if config.mail.api_key.is_none() {
        tracing::warn!("RESEND_API_KEY is not set; verification emails cannot be sent");
    }

    let max_body_size = config.max_body_size;
    let state: SharedState = Arc::new(AppState::new(pool, config));

    let security_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    Router::new()
        .merge(views::view_routes())
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(security_headers)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
