//! Application layer error types
//!
//! These errors represent request-level failures that the transport layer
//! translates into responses. Validation failures and missing aggregates are
//! distinct variants so callers can tell "bad request" from "no such story".

use thiserror::Error;

use crate::application::ports::outbound::RepositoryError;
use crate::application::validation::ValidationFailure;

/// Application layer result type
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Error, Debug)]
pub enum ApplicationError {
    /// The request broke one or more rules of its validator
    #[error("{0}")]
    Validation(ValidationFailure),

    /// A lookup by id found nothing
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// The caller gave up before any write happened
    #[error("Request was cancelled")]
    Cancelled,

    /// Persistence failed
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl ApplicationError {
    pub fn not_found(entity: &'static str, id: impl Into<i64>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<ValidationFailure> for ApplicationError {
    fn from(failure: ValidationFailure) -> Self {
        Self::Validation(failure)
    }
}
