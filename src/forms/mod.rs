//! Form state backing the registration pages and the edit modal.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::types::TypeConstraintError;

pub mod draft;
pub mod edit;
pub mod fields;
pub mod registration;

/// Validation messages keyed by field name.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

#[derive(Debug, Error, PartialEq)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    #[error(transparent)]
    TypeConstraint(#[from] TypeConstraintError),
}
