//! Typed error handling for the catalog
//!
//! Every repository operation returns a [`CatalogError`] so that callers can
//! tell apart the failures that belong in a normal response (bad input, a
//! missing record, an exhausted identifier space) from genuine storage faults.
//!
//! # Error Categories
//!
//! - `Validation`: a required text field was empty or a price was invalid
//! - `NotFound`: a referenced cart or product does not exist
//! - `Conflict`: identifier generation collided on every attempt
//! - `Storage`: anything the storage backend could not do (unexpected)
//!
//! Delete failures are deliberately absent: the repositories fold them into a
//! [`DeleteResult`](crate::core::model::DeleteResult) with `success: false`.

use crate::storage::StorageError;
use std::fmt;

/// The main error type for catalog operations
#[derive(Debug)]
pub enum CatalogError {
    /// Input rejected before touching storage
    Validation { field: String, message: String },

    /// Referenced record is missing
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// No free identifier found within the configured number of attempts
    Conflict {
        entity_type: &'static str,
        attempts: u32,
    },

    /// Unexpected storage fault (malformed document, I/O failure)
    Storage(StorageError),
}

impl CatalogError {
    /// Shorthand for a validation failure on a single field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a missing record
    pub fn not_found(entity_type: &'static str, id: impl fmt::Display) -> Self {
        CatalogError::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::Validation { .. } => "VALIDATION_ERROR",
            CatalogError::NotFound { .. } => "NOT_FOUND",
            CatalogError::Conflict { .. } => "CONFLICT",
            CatalogError::Storage(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this error should be reported as an internal failure
    pub fn is_internal(&self) -> bool {
        matches!(self, CatalogError::Storage(_))
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Validation { field, message } => {
                write!(f, "Validation failed for '{}': {}", field, message)
            }
            CatalogError::NotFound { entity_type, id } => {
                write!(f, "The {} '{}' does not exist", entity_type, id)
            }
            CatalogError::Conflict {
                entity_type,
                attempts,
            } => {
                write!(
                    f,
                    "Could not allocate a unique {} id after {} attempts",
                    entity_type, attempts
                )
            }
            CatalogError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StorageError> for CatalogError {
    fn from(err: StorageError) -> Self {
        CatalogError::Storage(err)
    }
}

impl From<validator::ValidationErrors> for CatalogError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Report the alphabetically first failing field so messages are stable
        let first = errors
            .field_errors()
            .into_iter()
            .min_by(|a, b| a.0.cmp(&b.0));

        match first {
            Some((field, field_errors)) => {
                let message = field_errors
                    .first()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => e.code.to_string(),
                    })
                    .unwrap_or_else(|| "invalid value".to_string());
                CatalogError::Validation {
                    field: camel_case(&field),
                    message,
                }
            }
            None => CatalogError::validation("input", errors.to_string()),
        }
    }
}

/// Wire name of a Rust field (`product_name` -> `productName`)
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
