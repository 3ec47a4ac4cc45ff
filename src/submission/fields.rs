pub const MSG_COMPANY_REQUIRED: &str = "Company name is required.";
pub const MSG_ADDRESS_REQUIRED: &str = "Address is required.";
pub const MSG_REPRESENTATIVE_REQUIRED: &str = "Name of representative is required.";
pub const MSG_EMAIL_REQUIRED: &str = "Email address is required.";
pub const MSG_CONTACT_REQUIRED: &str = "Contact number is required.";
pub const MSG_AMOUNT_INVALID: &str = "Please enter a valid amount.";
pub const MSG_AMOUNT_NOT_POSITIVE: &str = "Amount must be greater than 0.";
pub const MSG_REFERENCE_REQUIRED: &str = "Please enter the GCash/QR Ph reference number.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountError {
    Invalid,
    NotPositive,
}

impl AmountError {
    pub fn message(self) -> &'static str {
        match self {
            AmountError::Invalid => MSG_AMOUNT_INVALID,
            AmountError::NotPositive => MSG_AMOUNT_NOT_POSITIVE,
        }
    }
}

/// Parse a user-entered amount. Commas are thousands separators and are
/// dropped before parsing; the caller keeps the original text.
pub fn parse_amount(raw: &str) -> Result<f64, AmountError> {
    let cleaned = raw.trim().replace(',', "");
    let value: f64 = cleaned.parse().map_err(|_| AmountError::Invalid)?;

    // "inf" and "NaN" parse as f64 but are not amounts.
    if !value.is_finite() {
        return Err(AmountError::Invalid);
    }
    if value <= 0.0 {
        return Err(AmountError::NotPositive);
    }
    Ok(value)
}

/// One message per blank field, in the order given.
pub fn missing_required(fields: &[(&str, &'static str)]) -> Vec<String> {
    fields
        .iter()
        .filter(|(value, _)| value.trim().is_empty())
        .map(|(_, message)| message.to_string())
        .collect()
}
