use thiserror::Error;

/// Request-scoped error taxonomy for the assignment/audit subsystem.
///
/// None of these are retried automatically and none are fatal to the
/// process; callers surface them as-is.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Tenant mismatch between the caller and the target entity.
    /// Treated as a security boundary violation, never as transient.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Persistence error: {0}")]
    PersistenceError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Wraps a repository-layer failure into the persistence variant.
    pub fn persistence(err: impl std::fmt::Display) -> Self {
        ApiError::PersistenceError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(errors.to_string())
    }
}
