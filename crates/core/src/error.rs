use crate::registration::{Field, FieldKind};
use crate::validation::rules::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Field {field} is a {kind} input and cannot take a {attempted} value")]
    FieldKindMismatch {
        field: Field,
        kind: FieldKind,
        attempted: &'static str,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Submission rejected: {} field(s) failing validation", .0.len())]
    SubmissionRejected(FieldErrors),
}
