use thiserror::Error;

use crate::converters::html::RenderError;

/// Represents errors that can occur while registering templates or rendering slides.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The requested template id is not registered.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// A template was registered with an empty id.
    #[error("Invalid template id: template ids must be non-empty")]
    InvalidTemplateId,

    /// A component default in the theme names a token missing from its scale.
    #[error("Invalid theme '{theme}': unresolved token reference {reference}")]
    InvalidTheme { theme: String, reference: String },

    /// The slide's `type` discriminant is not part of the slide union.
    #[error("Unsupported slide type: {0}")]
    UnsupportedSlideType(String),

    /// A slide inside a batch failed; `index` is 1-based.
    #[error("Slide {index} failed: {source}")]
    SlideFailed {
        index: usize,
        #[source]
        source: Box<EngineError>,
    },

    /// Error raised by the HTML converter.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// The input document could not be decoded.
    #[error("Failed to decode slide document: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    /// Wraps `self` with the 1-based position of the slide that produced it.
    pub fn at_slide(self, index: usize) -> Self {
        EngineError::SlideFailed {
            index,
            source: Box::new(self),
        }
    }

    /// The innermost error, looking through per-slide wrappers.
    pub fn root_cause(&self) -> &EngineError {
        match self {
            EngineError::SlideFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// A type alias for `Result<T, EngineError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slide_wrapper_reports_index_and_cause() {
        let err = EngineError::UnsupportedSlideType("carousel".into()).at_slide(3);
        assert_eq!(err.to_string(), "Slide 3 failed: Unsupported slide type: carousel");
        assert!(matches!(
            err.root_cause(),
            EngineError::UnsupportedSlideType(tag) if tag == "carousel"
        ));
    }
}
