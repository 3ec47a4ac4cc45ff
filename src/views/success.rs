use askama::Template;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;

use crate::flash;
use crate::models::Submission;
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "success.html")]
struct SuccessTemplate {
    submission: Submission,
    verifier_email: String,
}

pub async fn page(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    match super::lookup(&state, &id).await {
        Ok(submission) => super::render(&SuccessTemplate {
            submission,
            verifier_email: state.mailer.verifier().to_string(),
        }),
        Err(message) => flash::redirect(flash::jar(&headers, &state.cookie_key), message, "/"),
    }
}
