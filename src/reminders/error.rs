//! Reminder engine error types.
//!
//! Store failures pass through as `Persistence` without reinterpretation.

use thiserror::Error;
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::enums::DoseStatus;

#[derive(Error, Debug)]
pub enum ReminderError {
    #[error("Dose event not found: {id}")]
    NotFound { id: Uuid },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Dose event {id} cannot leave status '{from}'")]
    InvalidTransition { id: Uuid, from: DoseStatus },

    #[error("Persistence error: {0}")]
    Persistence(#[from] DatabaseError),
}
