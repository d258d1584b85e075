//! Seams to the collaborators surrounding the engine.

pub mod alert_lookup;
pub mod clock;

pub use alert_lookup::IAlertLookup;
pub use clock::{IClock, ManualClock, SystemClock};
