use askama::Template;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;

use crate::flash;
use crate::qr::{self, Payload};
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "qr.html")]
struct QrTemplate {
    submission_id: String,
    amount: String,
    qr_data_url: Option<String>,
    errors: Vec<String>,
}

pub async fn qr_page(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let submission = match super::lookup(&state, &id).await {
        Ok(submission) => submission,
        Err(message) => {
            return flash::redirect(flash::jar(&headers, &state.cookie_key), message, "/");
        }
    };

    let encoded = Payload::for_submission(&submission)
        .to_json()
        .and_then(|payload| qr::data_url(&payload));

    let (qr_data_url, errors) = match encoded {
        Ok(url) => (Some(url), Vec::new()),
        Err(e) => {
            tracing::error!(submission_id = %submission.id, "{e}");
            (None, vec![format!("Could not generate QR code: {e}")])
        }
    };

    super::render(&QrTemplate {
        submission_id: submission.id.to_string(),
        amount: submission.amount,
        qr_data_url,
        errors,
    })
}
