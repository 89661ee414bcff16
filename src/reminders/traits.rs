//! Collaborator seams of the reminder engine.
//!
//! - ReminderStore: load/save of dose events and notification settings
//! - MedicationSource: the owner's medication list at generation time
//! - Clock: current date and time of day
//! - NotificationSink: fire-and-forget delivery intents

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

use super::notify::NotificationIntent;
use crate::db::DatabaseError;
use crate::models::enums::DoseStatus;
use crate::models::{DoseEvent, Medication, NotificationSettings};

/// Persistence of dose events and per-owner settings.
pub trait ReminderStore: Send {
    fn load_events(&self, owner_id: &Uuid, date: NaiveDate) -> Result<Vec<DoseEvent>, DatabaseError>;

    /// Replace every stored event of (owner, date). Must be all-or-nothing.
    fn save_events(
        &self,
        owner_id: &Uuid,
        date: NaiveDate,
        events: &[DoseEvent],
    ) -> Result<(), DatabaseError>;

    /// Single-row update of one event's status (and time, when given).
    fn update_event_status(
        &self,
        owner_id: &Uuid,
        event_id: &Uuid,
        status: DoseStatus,
        scheduled_time: Option<NaiveTime>,
    ) -> Result<(), DatabaseError>;

    fn delete_medication_events(
        &self,
        owner_id: &Uuid,
        medication_id: &Uuid,
    ) -> Result<usize, DatabaseError>;

    fn load_settings(&self, owner_id: &Uuid) -> Result<Option<NotificationSettings>, DatabaseError>;

    fn save_settings(
        &self,
        owner_id: &Uuid,
        settings: &NotificationSettings,
    ) -> Result<(), DatabaseError>;
}

/// Read access to an owner's medications.
pub trait MedicationSource {
    fn medications_for(&self, owner_id: &Uuid) -> Result<Vec<Medication>, DatabaseError>;
}

/// Injected wall clock.
pub trait Clock: Send {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    fn time_of_day(&self) -> NaiveTime {
        self.now().time()
    }
}

/// Receives delivery intents. Delivery itself happens elsewhere.
pub trait NotificationSink: Send {
    fn emit(&self, intent: &NotificationIntent);
}

impl MedicationSource for [Medication] {
    fn medications_for(&self, owner_id: &Uuid) -> Result<Vec<Medication>, DatabaseError> {
        Ok(self.iter().filter(|m| &m.owner_id == owner_id).cloned().collect())
    }
}

impl MedicationSource for Vec<Medication> {
    fn medications_for(&self, owner_id: &Uuid) -> Result<Vec<Medication>, DatabaseError> {
        self.as_slice().medications_for(owner_id)
    }
}
