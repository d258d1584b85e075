use serde::{Deserialize, Serialize};

use crate::constants::ALERT_KEY_SEPARATOR;
use crate::geo::GeoPoint;

/// Display-only data carried alongside an alert. The engine never reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertPayload {
    /// Object-store key of the recorded audio clip.
    pub s3_key: String,
    pub status: String,
    pub checksum: String,
    /// RFC 3339 creation time assigned upstream. Drives source retention.
    pub created_at: String,
}

/// A single sensor detection.
///
/// `device_id` + `ts` is the natural key. `distance` is the sensor's estimate
/// of how far away the source is, in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub device_id: String,
    #[serde(default)]
    pub ts: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default, alias = "Distance")]
    pub distance: f64,
    #[serde(flatten)]
    pub payload: AlertPayload,
}

impl Alert {
    pub fn new(
        device_id: impl Into<String>,
        ts: impl Into<String>,
        lat: f64,
        lon: f64,
        distance: f64,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            ts: ts.into(),
            lat,
            lon,
            distance,
            payload: AlertPayload::default(),
        }
    }

    pub fn with_payload(mut self, payload: AlertPayload) -> Self {
        self.payload = payload;
        self
    }

    /// Store key: `deviceId#ts`.
    pub fn key(&self) -> String {
        alert_key(&self.device_id, &self.ts)
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    /// Great-circle distance between the two reporting sensors, in meters.
    pub fn distance_to(&self, other: &Alert) -> f64 {
        self.position().distance_to(&other.position())
    }
}

pub(crate) fn alert_key(device_id: &str, ts: &str) -> String {
    let mut key = String::with_capacity(device_id.len() + ts.len() + 1);
    key.push_str(device_id);
    key.push(ALERT_KEY_SEPARATOR);
    key.push_str(ts);
    key
}
