//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is incomplete.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An operator- or environment-supplied value is invalid.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Config("missing field `url`".into()).to_string(),
            "Configuration error: missing field `url`"
        );
        assert_eq!(
            AppError::Validation("bad origin".into()).to_string(),
            "Validation error: bad origin"
        );
    }

    #[test]
    fn test_config_error_conversion() {
        let err = config::ConfigError::NotFound("database.url".into());
        assert!(matches!(AppError::from(err), AppError::Config(_)));
    }
}
