//! Configuration system for Canopy.
//! TOML-based, 3-layer resolution: env > file > compiled defaults.

pub mod canopy_config;
pub mod correlation_config;
pub mod defaults;
pub mod observability_config;
pub mod retention_config;
pub mod store_config;

pub use canopy_config::CanopyConfig;
pub use correlation_config::CorrelationConfig;
pub use observability_config::ObservabilityConfig;
pub use retention_config::RetentionConfig;
pub use store_config::StoreConfig;
