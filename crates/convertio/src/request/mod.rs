//! Request parameter models.
//!
//! Each endpoint takes one parameter model. Models are validated with the
//! `validator` crate before anything is serialized, and absent optional
//! fields are omitted from the serialized body.

mod conversion;
mod job;

use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

pub use self::conversion::{NewConversion, OcrOptions, OcrSettings};
pub use self::job::{
    DeleteCancel, DirectFileUpload, GetResult, GetStatus, ListConversions, UploadSource,
};
use crate::error::{SchemaError, SchemaErrorKind};
use crate::types::JobId;

/// Common behavior of endpoint parameter models.
pub trait Parameters: Serialize + DeserializeOwned + Validate + Sized {
    /// Validates the model, returning it unchanged on success.
    fn checked(self) -> Result<Self, SchemaError> {
        self.validate()?;
        Ok(self)
    }

    /// Builds and validates a model from loosely-typed JSON input.
    ///
    /// Defaults are applied for omitted fields; wrong primitive types and
    /// values outside closed sets are reported as [`SchemaError`].
    fn from_value(value: serde_json::Value) -> Result<Self, SchemaError> {
        let parameters: Self = serde_json::from_value(value)?;
        parameters.checked()
    }
}

impl From<ValidationErrors> for SchemaError {
    fn from(errors: ValidationErrors) -> Self {
        let mut flattened = Vec::new();
        flatten_errors(None, &errors, &mut flattened);
        flattened.sort_by(|(a, _), (b, _)| a.cmp(b));

        match flattened.into_iter().next() {
            Some((path, error)) => schema_error(path, error),
            None => SchemaError::new(SchemaErrorKind::InvalidValue, "validation failed"),
        }
    }
}

/// Collects every field error with its dotted path.
fn flatten_errors<'a>(
    prefix: Option<&str>,
    errors: &'a ValidationErrors,
    out: &mut Vec<(String, &'a ValidationError)>,
) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|error| (path.clone(), error)));
            }
            ValidationErrorsKind::Struct(nested) => flatten_errors(Some(&path), nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    flatten_errors(Some(&format!("{path}[{index}]")), nested, out);
                }
            }
        }
    }
}

/// Maps one validator error to a schema error.
fn schema_error(path: String, error: &ValidationError) -> SchemaError {
    // Struct-level checks report under `__all__` and name their field in params.
    let field = match error.params.get("field").and_then(|v| v.as_str()) {
        Some(field) => match path.rsplit_once('.') {
            Some((parent, _)) => format!("{parent}.{field}"),
            None => field.to_string(),
        },
        None => path,
    };

    let kind = match error.code.as_ref() {
        "required" => SchemaErrorKind::Missing,
        _ => SchemaErrorKind::InvalidValue,
    };

    let message = match &error.message {
        Some(message) => message.to_string(),
        None => match error.code.as_ref() {
            "length" => "has invalid length".to_string(),
            "range" => "is out of valid range".to_string(),
            code => format!("failed `{code}` check"),
        },
    };

    SchemaError::new(kind, message).with_field(field)
}

/// Builds a struct-level validation error attributed to `field`.
pub(crate) fn field_error(
    code: &'static str,
    field: &'static str,
    message: &'static str,
) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error.add_param("field".into(), &field);
    error
}

/// Rejects empty job identifiers.
pub(crate) fn validate_job_id(id: &JobId) -> Result<(), ValidationError> {
    if id.is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("job id must not be empty".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_pick_sorted_first_field() {
        let err = ListConversions::from_value(serde_json::json!({
            "status": "finished",
            "count": 0
        }))
        .unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::InvalidValue);
        assert_eq!(err.field.as_deref(), Some("count"));
    }

    #[test]
    fn test_job_id_required() {
        let err = GetStatus::new("").checked().unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::Missing);
        assert_eq!(err.field.as_deref(), Some("id"));
    }

    #[test]
    fn test_from_value_reports_wrong_type() {
        let err = ListConversions::from_value(serde_json::json!({
            "status": "all",
            "count": "four"
        }))
        .unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::InvalidType);
    }
}
