pub mod form;
pub mod payment;
pub mod success;
pub mod verify;

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use uuid::Uuid;

use crate::db;
use crate::models::Submission;
use crate::state::SharedState;

pub const MSG_NOT_FOUND: &str = "Submission not found.";

pub fn view_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(form::index))
        .route("/submit", post(form::submit))
        .route("/qr/{id}", get(payment::qr_page))
        .route("/verify/{id}", get(verify::page).post(verify::submit))
        .route("/success/{id}", get(success::page))
}

/// Load the submission named in the path. The error is the message to flash
/// before sending the user back to the form.
async fn lookup(state: &SharedState, raw_id: &str) -> Result<Submission, String> {
    // A malformed id cannot match any row.
    let Ok(id) = Uuid::parse_str(raw_id) else {
        return Err(MSG_NOT_FOUND.to_string());
    };

    let found = match state.pool() {
        Ok(pool) => db::submissions::find_by_id(pool, id).await,
        Err(e) => Err(e),
    };

    match found {
        Ok(Some(submission)) => Ok(submission),
        Ok(None) => Err(MSG_NOT_FOUND.to_string()),
        Err(e) => {
            tracing::error!(submission_id = %id, "Failed to load submission: {e}");
            Err(format!("Could not load submission: {e}"))
        }
    }
}

pub fn render<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template error: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}
