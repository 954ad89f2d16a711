use std::path::PathBuf;

use thiserror::Error;

/// Application-level errors (CLI layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] rota_service::error::ServiceError),

    #[error(transparent)]
    ModelError(#[from] rota_model::ModelError),

    #[error(transparent)]
    CoreError(#[from] rota_core::error::CoreError),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to access {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No rotation group at position {index} (have {len})")]
    UnknownGroup { index: usize, len: usize },
}

impl From<rota_model::SpecViolation> for AppError {
    fn from(violation: rota_model::SpecViolation) -> Self {
        Self::ModelError(violation.into())
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
