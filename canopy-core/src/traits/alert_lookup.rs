use crate::errors::CanopyResult;
use crate::models::Alert;

/// Point lookup of a persisted alert by its natural key.
///
/// Implemented by the database layer; the engine only calls it when an
/// [`crate::models::Envelope`] arrives.
pub trait IAlertLookup: Send + Sync {
    /// `Ok(None)` means the record does not exist (yet).
    fn get_alert(&self, device_id: &str, ts: &str) -> CanopyResult<Option<Alert>>;
}
