use askama::Template;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;

use crate::db;
use crate::email::VerificationRequest;
use crate::flash;
use crate::models::Submission;
use crate::state::SharedState;
use crate::submission::fields::MSG_REFERENCE_REQUIRED;
use crate::submission::ReferenceForm;

#[derive(Template)]
#[template(path = "reference.html")]
struct ReferenceTemplate {
    submission_id: String,
    submission: Submission,
    reference_number: String,
    errors: Vec<String>,
}

fn reference_page(submission: Submission, reference_number: String, errors: Vec<String>) -> Response {
    super::render(&ReferenceTemplate {
        submission_id: submission.id.to_string(),
        submission,
        reference_number,
        errors,
    })
}

pub async fn page(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    match super::lookup(&state, &id).await {
        Ok(submission) => reference_page(submission, String::new(), Vec::new()),
        Err(message) => flash::redirect(flash::jar(&headers, &state.cookie_key), message, "/"),
    }
}

/// Save the reference number, then notify the verifier. A failed email
/// leaves the saved reference in place.
pub async fn submit(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<ReferenceForm>,
) -> Response {
    let jar = flash::jar(&headers, &state.cookie_key);
    let submission = match super::lookup(&state, &id).await {
        Ok(submission) => submission,
        Err(message) => return flash::redirect(jar, message, "/"),
    };

    let reference_number = form.reference_number.trim().to_string();
    if reference_number.is_empty() {
        return reference_page(submission, reference_number, vec![MSG_REFERENCE_REQUIRED.to_string()]);
    }

    let saved = match state.pool() {
        Ok(pool) => db::submissions::set_reference_number(pool, submission.id, &reference_number).await,
        Err(e) => Err(e),
    };

    match saved {
        Ok(true) => {
            tracing::info!(submission_id = %submission.id, "Reference number saved");
        }
        Ok(false) => return flash::redirect(jar, super::MSG_NOT_FOUND, "/"),
        Err(e) => {
            tracing::error!(submission_id = %submission.id, "Failed to save reference: {e}");
            let errors = vec![format!("Could not save reference: {e}")];
            return reference_page(submission, reference_number, errors);
        }
    }

    let request = VerificationRequest::for_submission(&submission, &reference_number);
    if let Err(e) = state.mailer.send(&request).await {
        tracing::warn!(submission_id = %submission.id, "Verification email not sent: {e}");
        let errors = vec![format!("Verification email could not be sent: {e}")];
        return reference_page(submission, reference_number, errors);
    }

    Redirect::to(&format!("/success/{}", submission.id)).into_response()
}
