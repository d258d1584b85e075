//! # canopy-observability
//!
//! Tracing subscriber initialization and the span vocabulary shared by the
//! store and the correlation pipeline.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, init_tracing_with_filter};
