/// Errors raised by the alert lookup collaborator (the alert database).
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("alert backend unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("malformed alert record {key}: {reason}")]
    MalformedRecord { key: String, reason: String },
}
