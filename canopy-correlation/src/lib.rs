//! # canopy-correlation
//!
//! Correlation pass: overlap graph → maximal cliques (Bron–Kerbosch) →
//! single-pass consolidation. Plus the source ledger that accumulates results
//! across passes and the engine that drives one pass per arriving alert.

pub mod cliques;
pub mod consolidate;
pub mod engine;
pub mod graph;
pub mod ledger;
pub mod pipeline;

pub use cliques::{maximal_cliques, source_groups};
pub use consolidate::{consolidate, consolidate_to_fixed_point};
pub use engine::{CorrelationEngine, MaintenanceHandle, PassOutcome};
pub use graph::OverlapGraph;
pub use ledger::SourceLedger;
pub use pipeline::correlate;
