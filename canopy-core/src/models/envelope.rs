use serde::{Deserialize, Serialize};

use super::alert::alert_key;

/// Queue message announcing a newly persisted alert.
///
/// Carries only the natural key; the full record is resolved through
/// [`crate::traits::IAlertLookup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub device_id: String,
    pub ts: String,
}

impl Envelope {
    pub fn new(device_id: impl Into<String>, ts: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            ts: ts.into(),
        }
    }

    /// Natural key of the alert this envelope refers to.
    pub fn key(&self) -> String {
        alert_key(&self.device_id, &self.ts)
    }
}
