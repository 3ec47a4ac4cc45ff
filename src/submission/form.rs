use serde::Deserialize;

use super::fields::{self, parse_amount};
use crate::models::NewSubmission;

/// The company/payment form as posted by the browser. Missing fields
/// deserialize as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubmissionForm {
    pub company_name: String,
    pub address: String,
    pub representative_name: String,
    pub email: String,
    pub contact_number: String,
    pub app_software_name: String,
    pub amount: String,
}

impl SubmissionForm {
    pub fn trimmed(self) -> Self {
        Self {
            company_name: self.company_name.trim().to_string(),
            address: self.address.trim().to_string(),
            representative_name: self.representative_name.trim().to_string(),
            email: self.email.trim().to_string(),
            contact_number: self.contact_number.trim().to_string(),
            app_software_name: self.app_software_name.trim().to_string(),
            amount: self.amount.trim().to_string(),
        }
    }

    /// Check every rule and collect one message per failure.
    pub fn validate(&self) -> Result<NewSubmission, Vec<String>> {
        let mut errors = fields::missing_required(&[
            (self.company_name.as_str(), fields::MSG_COMPANY_REQUIRED),
            (self.address.as_str(), fields::MSG_ADDRESS_REQUIRED),
            (self.representative_name.as_str(), fields::MSG_REPRESENTATIVE_REQUIRED),
            (self.email.as_str(), fields::MSG_EMAIL_REQUIRED),
            (self.contact_number.as_str(), fields::MSG_CONTACT_REQUIRED),
        ]);

        if let Err(e) = parse_amount(&self.amount) {
            errors.push(e.message().to_string());
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewSubmission {
            company_name: self.company_name.clone(),
            address: self.address.clone(),
            representative_name: self.representative_name.clone(),
            email: self.email.clone(),
            contact_number: self.contact_number.clone(),
            app_software_name: Some(self.app_software_name.clone()).filter(|s| !s.is_empty()),
            amount: self.amount.clone(),
        })
    }
}

/// Query parameters that may pre-fill the form, e.g. from a payment link.
#[derive(Debug, Default, Deserialize)]
pub struct PrefillQuery {
    pub amount: Option<String>,
    pub amt: Option<String>,
    pub app_name: Option<String>,
    pub app_software_name: Option<String>,
    pub software: Option<String>,
}

impl PrefillQuery {
    pub fn amount(&self) -> String {
        first_non_empty(&[&self.amount, &self.amt])
    }

    pub fn app_software_name(&self) -> String {
        first_non_empty(&[&self.app_name, &self.app_software_name, &self.software])
    }

    pub fn into_form(self) -> SubmissionForm {
        SubmissionForm {
            amount: self.amount(),
            app_software_name: self.app_software_name(),
            ..SubmissionForm::default()
        }
    }
}

fn first_non_empty(candidates: &[&Option<String>]) -> String {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReferenceForm {
    pub reference_number: String,
}
