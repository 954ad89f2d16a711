use thiserror::Error;

/// Service layer errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    ModelError(#[from] rota_model::ModelError),

    #[error(transparent)]
    CoreError(#[from] rota_core::error::CoreError),
}

impl From<rota_model::SpecViolation> for ServiceError {
    fn from(violation: rota_model::SpecViolation) -> Self {
        Self::ModelError(violation.into())
    }
}

impl ServiceError {
    /// Returns the violation when the root cause is an invalid specification.
    #[must_use]
    pub fn violation(&self) -> Option<&rota_model::SpecViolation> {
        match self {
            Self::ModelError(err) => err.violation(),
            Self::CoreError(_) => None,
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
