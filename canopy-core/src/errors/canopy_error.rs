use super::{ConfigError, LookupError};

/// Top-level error. Aggregates subsystem errors via `From` conversions.
///
/// Correlation itself is infallible; only configuration and the alert lookup
/// collaborator can fail.
#[derive(Debug, thiserror::Error)]
pub enum CanopyError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("alert lookup error: {0}")]
    Lookup(#[from] LookupError),
}

pub type CanopyResult<T> = Result<T, CanopyError>;
