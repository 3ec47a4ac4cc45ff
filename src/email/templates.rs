use askama::Template;

/// The message the verifier receives. Every interpolated value is
/// autoescaped by askama.
#[derive(Template)]
#[template(path = "email/verification.html")]
pub struct VerificationEmail<'a> {
    pub company_name: &'a str,
    pub address: &'a str,
    pub representative_name: &'a str,
    pub email: &'a str,
    pub contact_number: &'a str,
    pub app_software_name: Option<&'a str>,
    pub amount: &'a str,
    pub reference_number: &'a str,
}

pub fn verification_subject(company_name: &str, reference_number: &str) -> String {
    format!("SKIS Gateway – Verification: {company_name} – Ref: {reference_number}")
}
