pub mod fields;
pub mod form;

pub use form::{PrefillQuery, ReferenceForm, SubmissionForm};
