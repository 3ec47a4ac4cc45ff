pub mod templates;

use std::time::Duration;

use askama::Template;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::MailConfig;
use crate::models::Submission;

use templates::VerificationEmail;

/// Upper bound for a single call to the email API. There is no retry.
pub const SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("RESEND_API_KEY is not set")]
    NotConfigured,

    #[error("failed to render email: {0}")]
    Render(#[from] askama::Error),

    #[error("email request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("email API returned {status}: {body}")]
    Rejected { status: StatusCode, body: String },
}

/// The fields reported to the verifier.
#[derive(Debug, Clone)]
pub struct VerificationRequest<'a> {
    pub company_name: &'a str,
    pub address: &'a str,
    pub representative_name: &'a str,
    pub email: &'a str,
    pub contact_number: &'a str,
    pub app_software_name: Option<&'a str>,
    pub amount: &'a str,
    pub reference_number: &'a str,
}

impl<'a> VerificationRequest<'a> {
    pub fn for_submission(submission: &'a Submission, reference_number: &'a str) -> Self {
        Self {
            company_name: &submission.company_name,
            address: &submission.address,
            representative_name: &submission.representative_name,
            email: &submission.email,
            contact_number: &submission.contact_number,
            app_software_name: submission.app_software_name.as_deref(),
            amount: &submission.amount,
            reference_number,
        }
    }

    pub fn subject(&self) -> String {
        templates::verification_subject(self.company_name, self.reference_number)
    }

    pub fn html(&self) -> Result<String, askama::Error> {
        VerificationEmail {
            company_name: self.company_name,
            address: self.address,
            representative_name: self.representative_name,
            email: self.email,
            contact_number: self.contact_number,
            app_software_name: self.app_software_name.filter(|s| !s.is_empty()),
            amount: self.amount,
            reference_number: self.reference_number,
        }
        .render()
    }
}

#[derive(Serialize)]
struct OutboundEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: String,
    html: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SendReceipt {
    pub id: Option<String>,
}

/// Sends verification requests through the Resend HTTP API.
pub struct VerificationMailer {
    client: Client,
    config: MailConfig,
}

impl VerificationMailer {
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(SEND_TIMEOUT)
                .build()
                .expect("Failed to build reqwest client"),
            config,
        }
    }

    pub fn verifier(&self) -> &str {
        &self.config.verifier
    }

    pub async fn send(&self, request: &VerificationRequest<'_>) -> Result<SendReceipt, MailError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(MailError::NotConfigured)?;

        let message = OutboundEmail {
            from: &self.config.from,
            to: [&self.config.verifier],
            subject: request.subject(),
            html: request.html()?,
        };

        let resp = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&message)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(512)
                .collect::<String>();
            return Err(MailError::Rejected { status, body });
        }

        let receipt = resp.json::<SendReceipt>().await.unwrap_or_default();
        tracing::info!(
            email_id = receipt.id.as_deref().unwrap_or("-"),
            "Verification email sent to {}",
            self.config.verifier
        );
        Ok(receipt)
    }
}
