//! Repository layer — owner-scoped database operations.
//!
//! Every function takes the owner id explicitly; nothing here reads
//! ambient session state.

mod dose_event;
mod medication;
mod notification_settings;

pub use dose_event::*;
pub use medication::*;
pub use notification_settings::*;
