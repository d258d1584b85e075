//! Data model shared by the store, the correlation pipeline, and consumers.

pub mod alert;
pub mod envelope;
pub mod params;
pub mod source_group;

pub use alert::{Alert, AlertPayload};
pub use envelope::Envelope;
pub use params::{CorrelationParams, OverlapTolerance};
pub use source_group::{SourceGroup, SourceReport, SourcesResponse};
