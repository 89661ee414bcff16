use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::NotificationSettings;

/// Stored settings for an owner, `None` if none were saved yet.
pub fn get_notification_settings(
    conn: &Connection,
    owner_id: &Uuid,
) -> Result<Option<NotificationSettings>, DatabaseError> {
    let stored = conn
        .query_row(
            "SELECT sms, email, in_app FROM notification_settings WHERE owner_id = ?1",
            params![owner_id.to_string()],
            |row| {
                Ok(NotificationSettings {
                    sms: row.get(0)?,
                    email: row.get(1)?,
                    in_app: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(stored)
}

pub fn upsert_notification_settings(
    conn: &Connection,
    owner_id: &Uuid,
    settings: &NotificationSettings,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO notification_settings (owner_id, sms, email, in_app)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(owner_id) DO UPDATE SET
             sms = excluded.sms, email = excluded.email, in_app = excluded.in_app",
        params![
            owner_id.to_string(),
            settings.sms,
            settings.email,
            settings.in_app
        ],
    )?;
    Ok(())
}
