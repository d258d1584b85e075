//! # canopy-core
//!
//! Foundation crate for the Canopy alert correlation engine.
//! Defines the alert and source-group models, geodesic distance, collaborator
//! traits, errors, config, and constants. Every other crate in the workspace
//! depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod geo;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::CanopyConfig;
pub use errors::{CanopyError, CanopyResult};
pub use geo::{haversine_m, GeoPoint};
pub use models::{
    Alert, AlertPayload, CorrelationParams, Envelope, OverlapTolerance, SourceGroup,
    SourceReport, SourcesResponse,
};
