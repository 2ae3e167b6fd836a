//! Application services shared by the HTTP routes.

use thiserror::Error;

use crate::forms::FormError;
use crate::repository::errors::ApiError;

pub mod records;
pub mod registration;
pub mod visualization;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid form: {0}")]
    Form(#[from] FormError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Record not found")]
    NotFound,
}

pub type ServiceResult<T> = Result<T, ServiceError>;
