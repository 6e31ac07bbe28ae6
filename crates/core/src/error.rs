use crate::types::DbId;

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

    /// No active pricing rule exists for a requested question type.
    ///
    /// This is a configuration gap, not a caller mistake: pricing aborts
    /// entirely rather than returning a partial result.
    #[error("No active pricing rule for question type '{question_type}'")]
    MissingRule { question_type: String },

    #[error("Internal error: {0}")]
    Internal(String),
}
