//! Error handling for Canopy.
//! One error enum per subsystem, `thiserror` only.

pub mod canopy_error;
pub mod config_error;
pub mod lookup_error;

pub use canopy_error::{CanopyError, CanopyResult};
pub use config_error::ConfigError;
pub use lookup_error::LookupError;
