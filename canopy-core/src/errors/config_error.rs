/// Configuration loading and validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    #[error("failed to parse config {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("missing required config value: {field}")]
    MissingField { field: String },

    #[error("invalid value for {field}: {message}")]
    ValidationFailed { field: String, message: String },
}
