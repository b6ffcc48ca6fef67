//! Error types for code emission

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for code emission
pub type EmissionResult<T> = Result<T, EmissionError>;

/// Error type for rendering and writing generated code
#[derive(Error, Debug)]
pub enum EmissionError {
    /// A generated file could not be written
    #[error("failed to write {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A type could not be rendered for the target language
    #[error("cannot render {type_name}: {reason}")]
    Render { type_name: String, reason: String },

    /// The requested target language is not supported
    #[error("unsupported language: {0} (expected java or rust)")]
    UnsupportedLanguage(String),

    /// The generator configuration is invalid
    #[error("invalid generator configuration: {0}")]
    Config(String),
}

impl EmissionError {
    pub(crate) fn render(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        EmissionError::Render {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }
}
