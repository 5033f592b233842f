//! Error types and result types for catalog operations.
//!
//! Two layers of errors live here:
//!
//! - [`StoreError`] is what a [`ProductStore`](crate::backend::ProductStore) backend reports.
//!   It only ever describes infrastructure trouble; "no such record" is an `Ok(None)`.
//! - [`CatalogError`] is what the [`Catalog`](crate::catalog::Catalog) mediator hands to the
//!   protocol adapters. Every failure is one of exactly three kinds.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors raised by a storage backend.
///
/// All variants are infrastructure faults from the point of view of the catalog:
/// the mediator never inspects them beyond logging, and reports them to callers
/// as [`CatalogError::Infrastructure`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// A product could not be encoded into the stored form.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error during store initialization or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// A stored document could not be read back as a product.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for backend operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// What went wrong with a single input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldIssue {
    /// A required field was absent or null.
    Missing,
    /// The field was present but had the wrong type or an out-of-range value.
    Malformed,
}

/// One rejected field of a create or update payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub issue: FieldIssue,
    pub message: String,
}

/// Every field that failed validation, in the order they were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missing(&mut self, field: &'static str) {
        self.0.push(FieldError {
            field,
            issue: FieldIssue::Missing,
            message: format!("{field} is required"),
        });
    }

    pub fn malformed(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            issue: FieldIssue::Malformed,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Names of the rejected fields.
    pub fn fields(&self) -> Vec<&'static str> {
        self.0
            .iter()
            .map(|e| e.field)
            .collect()
    }

    /// Returns `Ok(value)` when nothing was recorded, otherwise the collected errors.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages = self.0
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>();

        write!(f, "{}", messages.join("; "))
    }
}

/// The three failure kinds the catalog surfaces to either protocol adapter.
///
/// | Kind | REST | GraphQL |
/// |---|---|---|
/// | `Validation` | 400 | field error |
/// | `NotFound` | 404 | `null` |
/// | `Infrastructure` | 500 | field error |
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Malformed or missing input. Never reaches the store.
    #[error("Invalid data: {0}")]
    Validation(ValidationErrors),
    /// The identifier does not name a live record (or could not be parsed as one).
    #[error("Product not found: {0}")]
    NotFound(String),
    /// The store was unreachable or failed. The message is for logs, not for clients.
    #[error("Infrastructure failure: {0}")]
    Infrastructure(String),
}

/// A specialized `Result` type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<ValidationErrors> for CatalogError {
    fn from(errors: ValidationErrors) -> Self {
        CatalogError::Validation(errors)
    }
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        CatalogError::Infrastructure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_collect_in_order() {
        let mut errors = ValidationErrors::new();
        errors.missing("name");
        errors.malformed("price", "price must be a non-negative number");

        assert_eq!(errors.fields(), vec!["name", "price"]);
        assert_eq!(errors.errors()[0].issue, FieldIssue::Missing);
        assert_eq!(
            errors.to_string(),
            "name is required; price must be a non-negative number"
        );
    }

    #[test]
    fn test_into_result_passes_value_through_when_clean() {
        let errors = ValidationErrors::new();
        assert_eq!(errors.into_result(7), Ok(7));
    }

    #[test]
    fn test_store_error_becomes_infrastructure() {
        let err: CatalogError = StoreError::Backend("connection refused".into()).into();
        assert!(matches!(err, CatalogError::Infrastructure(msg) if msg.contains("connection refused")));
    }

    #[test]
    fn test_field_errors_serialize_with_lowercase_issue() {
        let mut errors = ValidationErrors::new();
        errors.missing("name");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "field": "name", "issue": "missing", "message": "name is required" }])
        );
    }
}
