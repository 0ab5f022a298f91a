use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use std::collections::BTreeMap;

/// Field-keyed validation error map. Errors that do not belong to a single
/// field (cross-field rules) are keyed under `__all__`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(pub BTreeMap<String, Vec<String>>);

pub const NON_FIELD: &str = "__all__";

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn into_result(self) -> Result<(), CrmError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CrmError::Validation(self))
        }
    }
}

/// Error taxonomy for the entity store. An entity that exists under a
/// different owner surfaces as `NotFound`, never as a permission variant.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CrmError {
    #[error("not found")]
    NotFound,
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("database error: {0}")]
    Database(String),
}

impl From<diesel::result::Error> for CrmError {
    fn from(e: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};
        match e {
            Error::NotFound => CrmError::NotFound,
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                // Integrity errors that slipped past validation come back in
                // the same field-keyed shape as the validation layer.
                let field = if info.constraint_name().unwrap_or("").contains("email") {
                    "email"
                } else {
                    NON_FIELD
                };
                CrmError::Validation(FieldErrors::single(field, "Value already exists"))
            }
            other => CrmError::Database(other.to_string()),
        }
    }
}

impl From<diesel::r2d2::PoolError> for CrmError {
    fn from(e: diesel::r2d2::PoolError) -> Self {
        CrmError::Database(e.to_string())
    }
}

impl IntoResponse for CrmError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({"error": "not found"})),
            )
                .into_response(),
            Self::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({"errors": errors})),
            )
                .into_response(),
            Self::Database(msg) => {
                log::error!("database error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "internal server error"})),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_accumulate() {
        let mut errors = FieldErrors::new();
        errors.add("email", "Email is required");
        errors.add("email", "Email is invalid");
        errors.add("name", "Name is required");
        assert_eq!(errors.0["email"].len(), 2);
        assert!(errors.has("name"));
        assert!(!errors.has("phone"));
    }

    #[test]
    fn test_empty_errors_are_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
        assert!(FieldErrors::single("name", "required").into_result().is_err());
    }

    #[test]
    fn test_diesel_not_found_maps_to_not_found() {
        let err: CrmError = diesel::result::Error::NotFound.into();
        assert!(matches!(err, CrmError::NotFound));
    }
}
