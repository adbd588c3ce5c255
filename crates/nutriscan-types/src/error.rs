//! Error types for nutriscan

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("API key not configured: set {0} in the environment or in .env")]
    MissingApiKey(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Coarse classification of [`Error`], stable enough to assert on in tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure, timeout, non-success status or empty model output
    ExternalService,
    /// Model output was not a JSON object
    Parse,
    /// Required input missing; reported as a warning, never reaches the network
    Validation,
    Config,
    /// Unreadable or unsupported image
    Input,
    Io,
    Export,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel export error: {0}")]
    Excel(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid image format: {0}")]
    InvalidImageFormat(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::ExternalService(err.to_string())
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ExternalService(_) => ErrorKind::ExternalService,
            Error::Parse(_) => ErrorKind::Parse,
            Error::Validation(_) => ErrorKind::Validation,
            Error::Config(_) => ErrorKind::Config,
            Error::Image(_) | Error::FileNotFound(_) | Error::InvalidImageFormat(_) => {
                ErrorKind::Input
            }
            Error::Io(_) | Error::Json(_) => ErrorKind::Io,
            Error::Csv(_) | Error::Excel(_) => ErrorKind::Export,
        }
    }

    /// Missing inputs are shown to the user as a warning rather than an error
    pub fn is_warning(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            Error::ExternalService("timeout".into()).kind(),
            ErrorKind::ExternalService
        );
        assert_eq!(Error::Parse("x".into()).kind(), ErrorKind::Parse);
        assert_eq!(
            Error::Config(ConfigError::MissingApiKey("GEMINI_API_KEY".into())).kind(),
            ErrorKind::Config
        );
        assert_eq!(Error::FileNotFound("a.jpg".into()).kind(), ErrorKind::Input);
        assert_eq!(Error::Excel("boom".into()).kind(), ErrorKind::Export);
    }

    #[test]
    fn test_only_validation_is_warning() {
        assert!(Error::Validation("envie a foto".into()).is_warning());
        assert!(!Error::Parse("bad".into()).is_warning());
        assert!(!Error::ExternalService("503".into()).is_warning());
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = Error::Validation("Por favor, envie a foto do rótulo primeiro.".into());
        assert_eq!(err.to_string(), "Por favor, envie a foto do rótulo primeiro.");
    }
}
