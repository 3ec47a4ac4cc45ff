use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub company_name: String,
    pub address: String,
    pub representative_name: String,
    pub email: String,
    pub contact_number: String,
    pub app_software_name: Option<String>,
    /// Kept exactly as entered (thousands separators included).
    pub amount: String,
    pub reference_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated form input, ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub company_name: String,
    pub address: String,
    pub representative_name: String,
    pub email: String,
    pub contact_number: String,
    pub app_software_name: Option<String>,
    pub amount: String,
}
