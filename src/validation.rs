//! Shared validation helpers for request payloads.

use std::borrow::Cow;

use store::DocumentId;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

pub const ID_VALIDATION_ERROR: &str = "Неверный формат id";

/// `validator` hook: the value must be a 24-character hex document id.
pub fn validate_object_id(value: &str) -> Result<(), ValidationError> {
    if DocumentId::is_valid(value) {
        Ok(())
    } else {
        Err(ValidationError::new("object_id").with_message(Cow::Borrowed(ID_VALIDATION_ERROR)))
    }
}

/// Flatten nested validation errors into one message per failure.
///
/// Messages are sorted so responses are stable across runs.
pub fn error_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut out = Vec::new();
    collect(errors, "", &mut out);
    out.sort();
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if field.to_string() == "__all__" {
            prefix.trim_end_matches('.').to_string()
        } else {
            format!("{prefix}{field}")
        };

        match kind {
            ValidationErrorsKind::Field(failures) => {
                for failure in failures {
                    out.push(describe(&path, failure));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &format!("{path}."), out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{path}.{index}."), out);
                }
            }
        }
    }
}

fn describe(path: &str, failure: &ValidationError) -> String {
    match &failure.message {
        Some(message) => message.to_string(),
        None if path.is_empty() => format!("validation failed: {}", failure.code),
        None => format!("{path} is invalid: {}", failure.code),
    }
}
