//! # canopy-store
//!
//! Bounded-lifetime store of recent alerts. The store is the only long-lived
//! mutable state of the engine: one `RwLock` guards the map, adds and prunes
//! write, snapshots read.

pub mod entry;
pub mod store;
pub mod sweeper;

pub use store::AlertStore;
pub use sweeper::{spawn_sweeper, SweeperHandle};
