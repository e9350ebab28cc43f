//! Shared error types for the services crate.

use thiserror::Error;

use api::ApiError;

/// Errors emitted by the screen services when a fetch or update fails.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServiceError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ServiceError {
    /// True when the API rejected the credentials.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ServiceError::Api(ApiError::Unauthorized))
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Api(ApiError::NotFound))
    }
}

/// Errors emitted by `ProfileService::export`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Encode(#[from] serde_json::Error),
}

impl From<ApiError> for ExportError {
    fn from(err: ApiError) -> Self {
        Self::Service(ServiceError::Api(err))
    }
}
