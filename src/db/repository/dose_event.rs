use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::medication::parse_uuid;
use crate::db::DatabaseError;
use crate::models::enums::DoseStatus;
use crate::models::time::{format_hhmm, parse_hhmm};
use crate::models::DoseEvent;

/// Replace every event of (owner, date) with `events`, in one transaction.
pub fn replace_events_for_date(
    conn: &Connection,
    owner_id: &Uuid,
    date: NaiveDate,
    events: &[DoseEvent],
) -> Result<(), DatabaseError> {
    let tx = conn.unchecked_transaction()?;

    tx.execute(
        "DELETE FROM dose_events WHERE owner_id = ?1 AND event_date = ?2",
        params![owner_id.to_string(), date.to_string()],
    )?;

    for event in events {
        if event.date != date {
            return Err(DatabaseError::ConstraintViolation(format!(
                "event {} belongs to {}, not {date}",
                event.id, event.date
            )));
        }
        tx.execute(
            "INSERT INTO dose_events
             (id, owner_id, medication_id, medication_name, dosage, scheduled_time,
              status, event_date, ordinal)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                event.id.to_string(),
                owner_id.to_string(),
                event.medication_id.to_string(),
                event.medication_name,
                event.dosage,
                format_hhmm(event.scheduled_time),
                event.status.as_str(),
                event.date.to_string(),
                event.ordinal,
            ],
        )?;
    }

    tx.commit()?;
    Ok(())
}

/// Events of (owner, date) ordered by time, then medication slot.
pub fn get_events_for_date(
    conn: &Connection,
    owner_id: &Uuid,
    date: NaiveDate,
) -> Result<Vec<DoseEvent>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, medication_id, medication_name, dosage, scheduled_time, status,
                event_date, ordinal
         FROM dose_events
         WHERE owner_id = ?1 AND event_date = ?2
         ORDER BY scheduled_time ASC, medication_id ASC, ordinal ASC",
    )?;

    let rows = stmt.query_map(params![owner_id.to_string(), date.to_string()], |row| {
        Ok(DoseEventRow {
            id: row.get(0)?,
            medication_id: row.get(1)?,
            medication_name: row.get(2)?,
            dosage: row.get(3)?,
            scheduled_time: row.get(4)?,
            status: row.get(5)?,
            event_date: row.get(6)?,
            ordinal: row.get(7)?,
        })
    })?;

    let mut events = Vec::new();
    for row in rows {
        events.push(dose_event_from_row(row?)?);
    }
    Ok(events)
}

/// Single-row status update. `scheduled_time` is only written when given.
pub fn update_event_status(
    conn: &Connection,
    owner_id: &Uuid,
    event_id: &Uuid,
    status: DoseStatus,
    scheduled_time: Option<NaiveTime>,
) -> Result<(), DatabaseError> {
    let changed = match scheduled_time {
        Some(time) => conn.execute(
            "UPDATE dose_events SET status = ?1, scheduled_time = ?2
             WHERE id = ?3 AND owner_id = ?4",
            params![
                status.as_str(),
                format_hhmm(time),
                event_id.to_string(),
                owner_id.to_string()
            ],
        )?,
        None => conn.execute(
            "UPDATE dose_events SET status = ?1 WHERE id = ?2 AND owner_id = ?3",
            params![status.as_str(), event_id.to_string(), owner_id.to_string()],
        )?,
    };
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "DoseEvent".into(),
            id: event_id.to_string(),
        });
    }
    Ok(())
}

/// Remove every event (any date) of one medication. Returns rows removed.
pub fn delete_events_for_medication(
    conn: &Connection,
    owner_id: &Uuid,
    medication_id: &Uuid,
) -> Result<usize, DatabaseError> {
    let removed = conn.execute(
        "DELETE FROM dose_events WHERE owner_id = ?1 AND medication_id = ?2",
        params![owner_id.to_string(), medication_id.to_string()],
    )?;
    Ok(removed)
}

struct DoseEventRow {
    id: String,
    medication_id: String,
    medication_name: String,
    dosage: String,
    scheduled_time: String,
    status: String,
    event_date: String,
    ordinal: u32,
}

fn dose_event_from_row(row: DoseEventRow) -> Result<DoseEvent, DatabaseError> {
    Ok(DoseEvent {
        id: parse_uuid("dose_events.id", &row.id)?,
        medication_id: parse_uuid("dose_events.medication_id", &row.medication_id)?,
        medication_name: row.medication_name,
        dosage: row.dosage,
        scheduled_time: parse_hhmm(&row.scheduled_time)?,
        status: DoseStatus::from_str(&row.status)?,
        date: NaiveDate::parse_from_str(&row.event_date, "%Y-%m-%d").map_err(|_| {
            DatabaseError::InvalidValue {
                field: "dose_events.event_date".into(),
                value: row.event_date.clone(),
            }
        })?,
        ordinal: row.ordinal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::models::enums::Frequency;
    use crate::models::time::hm;
    use crate::models::Medication;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn events_for(med: &Medication, date: NaiveDate) -> Vec<DoseEvent> {
        vec![
            DoseEvent::scheduled(med, date, 0, hm(8, 0)),
            DoseEvent::scheduled(med, date, 1, hm(20, 0)),
        ]
    }

    #[test]
    fn replace_and_load() {
        let conn = open_memory_database().unwrap();
        let owner = Uuid::new_v4();
        let med = Medication::new(owner, "Aspirin", "81mg", Frequency::Twice);
        let events = events_for(&med, day());

        replace_events_for_date(&conn, &owner, day(), &events).unwrap();
        let loaded = get_events_for_date(&conn, &owner, day()).unwrap();
        assert_eq!(loaded, events);
    }

    #[test]
    fn replace_discards_previous_rows() {
        let conn = open_memory_database().unwrap();
        let owner = Uuid::new_v4();
        let med = Medication::new(owner, "Aspirin", "81mg", Frequency::Twice);
        replace_events_for_date(&conn, &owner, day(), &events_for(&med, day())).unwrap();

        let other = Medication::new(owner, "Metformin", "500mg", Frequency::Once);
        let fresh = vec![DoseEvent::scheduled(&other, day(), 0, hm(8, 0))];
        replace_events_for_date(&conn, &owner, day(), &fresh).unwrap();

        let loaded = get_events_for_date(&conn, &owner, day()).unwrap();
        assert_eq!(loaded, fresh);
    }

    #[test]
    fn replace_rejects_foreign_date_and_keeps_old_rows() {
        let conn = open_memory_database().unwrap();
        let owner = Uuid::new_v4();
        let med = Medication::new(owner, "Aspirin", "81mg", Frequency::Twice);
        let original = events_for(&med, day());
        replace_events_for_date(&conn, &owner, day(), &original).unwrap();

        let tomorrow = day().succ_opt().unwrap();
        let err = replace_events_for_date(&conn, &owner, day(), &events_for(&med, tomorrow))
            .unwrap_err();
        assert!(matches!(err, DatabaseError::ConstraintViolation(_)));

        let loaded = get_events_for_date(&conn, &owner, day()).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn update_status_and_time() {
        let conn = open_memory_database().unwrap();
        let owner = Uuid::new_v4();
        let med = Medication::new(owner, "Aspirin", "81mg", Frequency::Twice);
        let events = events_for(&med, day());
        replace_events_for_date(&conn, &owner, day(), &events).unwrap();

        update_event_status(&conn, &owner, &events[0].id, DoseStatus::Snoozed, Some(hm(8, 15)))
            .unwrap();
        update_event_status(&conn, &owner, &events[1].id, DoseStatus::Taken, None).unwrap();

        let loaded = get_events_for_date(&conn, &owner, day()).unwrap();
        assert_eq!(loaded[0].status, DoseStatus::Snoozed);
        assert_eq!(loaded[0].scheduled_time, hm(8, 15));
        assert_eq!(loaded[1].status, DoseStatus::Taken);
        assert_eq!(loaded[1].scheduled_time, hm(20, 0));
    }

    #[test]
    fn update_unknown_event_is_not_found() {
        let conn = open_memory_database().unwrap();
        let err = update_event_status(&conn, &Uuid::new_v4(), &Uuid::new_v4(), DoseStatus::Taken, None)
            .unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }

    #[test]
    fn update_is_scoped_to_owner() {
        let conn = open_memory_database().unwrap();
        let owner = Uuid::new_v4();
        let med = Medication::new(owner, "Aspirin", "81mg", Frequency::Twice);
        let events = events_for(&med, day());
        replace_events_for_date(&conn, &owner, day(), &events).unwrap();

        let intruder = Uuid::new_v4();
        let err = update_event_status(&conn, &intruder, &events[0].id, DoseStatus::Taken, None)
            .unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }

    #[test]
    fn delete_for_medication_spans_dates() {
        let conn = open_memory_database().unwrap();
        let owner = Uuid::new_v4();
        let med = Medication::new(owner, "Aspirin", "81mg", Frequency::Twice);
        let tomorrow = day().succ_opt().unwrap();
        replace_events_for_date(&conn, &owner, day(), &events_for(&med, day())).unwrap();
        replace_events_for_date(&conn, &owner, tomorrow, &events_for(&med, tomorrow)).unwrap();

        let removed = delete_events_for_medication(&conn, &owner, &med.id).unwrap();
        assert_eq!(removed, 4);
        assert!(get_events_for_date(&conn, &owner, day()).unwrap().is_empty());
    }
}
