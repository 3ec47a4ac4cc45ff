use askama::Template;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;

use crate::db;
use crate::flash;
use crate::state::SharedState;
use crate::submission::{PrefillQuery, SubmissionForm};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    form: SubmissionForm,
    errors: Vec<String>,
}

pub async fn index(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(prefill): Query<PrefillQuery>,
) -> Response {
    let (jar, errors) = flash::take(flash::jar(&headers, &state.cookie_key));
    let template = IndexTemplate {
        form: prefill.into_form(),
        errors,
    };
    (jar, super::render(&template)).into_response()
}

pub async fn submit(
    State(state): State<SharedState>,
    Form(form): Form<SubmissionForm>,
) -> Response {
    let form = form.trimmed();

    let new = match form.validate() {
        Ok(new) => new,
        Err(errors) => {
            tracing::debug!(failed_rules = errors.len(), "Submission rejected");
            return super::render(&IndexTemplate { form, errors });
        }
    };

    let created = match state.pool() {
        Ok(pool) => db::submissions::create(pool, &new).await,
        Err(e) => Err(e),
    };

    match created {
        Ok(submission) => {
            tracing::info!(submission_id = %submission.id, "Submission created");
            Redirect::to(&format!("/qr/{}", submission.id)).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to save submission: {e}");
            super::render(&IndexTemplate {
                form,
                errors: vec![format!("Could not save submission: {e}")],
            })
        }
    }
}
