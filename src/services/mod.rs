//! Service layer: the operations callers use to search and maintain the catalog.

use thiserror::Error;

use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod property;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The store could not be reached or failed to execute the request.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    /// Caller input was rejected before reaching the store.
    #[error("form error: {0}")]
    Form(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}
