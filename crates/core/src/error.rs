use crate::types::DbId;
use crate::workflow::WorkflowError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<WorkflowError> for CoreError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::NotAuthorized { .. } => CoreError::Forbidden(err.to_string()),
            WorkflowError::AlreadyProcessed => CoreError::InvalidState(err.to_string()),
            WorkflowError::InvalidDecision(_) => CoreError::InvalidState(err.to_string()),
        }
    }
}
