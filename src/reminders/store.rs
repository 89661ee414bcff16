//! SQLite-backed reminder store and medication source.

use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;
use uuid::Uuid;

use super::traits::{MedicationSource, ReminderStore};
use crate::db::{self, DatabaseError};
use crate::models::enums::DoseStatus;
use crate::models::{DoseEvent, Medication, NotificationSettings};

pub struct SqliteReminderStore {
    conn: Connection,
}

impl SqliteReminderStore {
    /// Open (and migrate) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        let conn = db::open_database(path)?;
        tracing::info!(path = %path.display(), "Reminder store opened");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        Ok(Self {
            conn: db::open_memory_database()?,
        })
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl ReminderStore for SqliteReminderStore {
    fn load_events(&self, owner_id: &Uuid, date: NaiveDate) -> Result<Vec<DoseEvent>, DatabaseError> {
        db::get_events_for_date(&self.conn, owner_id, date)
    }

    fn save_events(
        &self,
        owner_id: &Uuid,
        date: NaiveDate,
        events: &[DoseEvent],
    ) -> Result<(), DatabaseError> {
        db::replace_events_for_date(&self.conn, owner_id, date, events)
    }

    fn update_event_status(
        &self,
        owner_id: &Uuid,
        event_id: &Uuid,
        status: DoseStatus,
        scheduled_time: Option<NaiveTime>,
    ) -> Result<(), DatabaseError> {
        db::update_event_status(&self.conn, owner_id, event_id, status, scheduled_time)
    }

    fn delete_medication_events(
        &self,
        owner_id: &Uuid,
        medication_id: &Uuid,
    ) -> Result<usize, DatabaseError> {
        db::delete_events_for_medication(&self.conn, owner_id, medication_id)
    }

    fn load_settings(&self, owner_id: &Uuid) -> Result<Option<NotificationSettings>, DatabaseError> {
        db::get_notification_settings(&self.conn, owner_id)
    }

    fn save_settings(
        &self,
        owner_id: &Uuid,
        settings: &NotificationSettings,
    ) -> Result<(), DatabaseError> {
        db::upsert_notification_settings(&self.conn, owner_id, settings)
    }
}

impl MedicationSource for SqliteReminderStore {
    fn medications_for(&self, owner_id: &Uuid) -> Result<Vec<Medication>, DatabaseError> {
        db::get_medications_for_owner(&self.conn, owner_id)
    }
}
