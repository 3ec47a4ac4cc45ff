use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::email::VerificationRequest;
use crate::error::AppError;
use crate::state::SharedState;

/// Stand-alone verifier notification, for clients that keep their own
/// records. The recipient is always the configured verifier.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VerificationEmailRequest {
    pub company_name: String,
    pub address: String,
    pub representative_name: String,
    pub email: String,
    pub contact_number: String,
    pub app_software_name: Option<String>,
    pub amount: String,
    pub reference_number: String,
}

#[derive(Serialize)]
pub struct SendResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

pub async fn send(
    State(state): State<SharedState>,
    body: Result<Json<VerificationEmailRequest>, JsonRejection>,
) -> Result<Json<SendResponse>, AppError> {
    let Json(req) = body.map_err(|e| {
        tracing::debug!("Rejected verification email body: {e}");
        AppError::BadRequest("Invalid JSON".to_string())
    })?;

    if req.company_name.trim().is_empty() || req.reference_number.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Missing required fields: companyName, referenceNumber".to_string(),
        ));
    }

    let request = VerificationRequest {
        company_name: &req.company_name,
        address: &req.address,
        representative_name: &req.representative_name,
        email: &req.email,
        contact_number: &req.contact_number,
        app_software_name: req.app_software_name.as_deref(),
        amount: &req.amount,
        reference_number: &req.reference_number,
    };

    let receipt = state.mailer.send(&request).await?;

    Ok(Json(SendResponse {
        success: true,
        id: receipt.id,
    }))
}
