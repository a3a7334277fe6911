use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Image cannot be empty")]
    EmptyImage,

    #[error("Image too large: {size} bytes exceeds the {max} byte limit")]
    ImageTooLarge { size: usize, max: usize },

    #[error("Invalid data URI")]
    InvalidDataUri,

    #[error("Session not found")]
    SessionNotFound,

    #[error("Cannot {action} while the session is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error")]
    InternalServerError,
}
