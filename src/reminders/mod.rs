//! Daily reminder engine
//!
//! Turns an owner's medication list into the day's dose events and tracks
//! each event through its status lifecycle.
//!
//! ## Architecture
//!
//! ```text
//! Medication set → frequency::resolve_times → schedule::generate
//!                → lifecycle::ReminderManager → categorize / notify
//! ```
//!
//! Storage, the medication list, the clock and notification delivery are
//! collaborators behind the traits in [`traits`]. All operations are
//! synchronous; one manager serves one owner on one device.

pub mod error;
pub mod traits;
pub mod frequency;
pub mod schedule;
pub mod categorize;
pub mod lifecycle;
pub mod clock;
pub mod notify;
pub mod store;

pub use error::ReminderError;
pub use traits::*;
pub use frequency::resolve_times;
pub use schedule::generate;
pub use categorize::{categorize, classify, is_overdue, CategorizedReminders, DaySummary, ReminderCategory};
pub use lifecycle::ReminderManager;
pub use clock::{ManualClock, SystemClock};
pub use notify::{ChannelSink, NotificationIntent};
pub use store::SqliteReminderStore;
