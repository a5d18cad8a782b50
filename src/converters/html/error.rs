use thiserror::Error;

/// Errors that can occur while emitting slide HTML.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Formatting error during HTML generation: {0}")]
    Format(#[from] std::fmt::Error),
    #[error("An internal error occurred during rendering: {0}")]
    Internal(String),
}

/// A specialized Result type for HTML rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
