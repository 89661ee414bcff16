pub mod enums;
pub mod time;
pub mod medication;
pub mod dose_event;
pub mod notification;

pub use medication::*;
pub use dose_event::*;
pub use notification::*;
