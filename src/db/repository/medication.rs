use std::str::FromStr;

use chrono::NaiveTime;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::enums::*;
use crate::models::time::{format_hhmm, parse_hhmm};
use crate::models::*;

/// Insert a medication at the end of its owner's list.
pub fn insert_medication(conn: &Connection, med: &Medication) -> Result<(), DatabaseError> {
    let position: i64 = conn.query_row(
        "SELECT COALESCE(MAX(position) + 1, 0) FROM medications WHERE owner_id = ?1",
        params![med.owner_id.to_string()],
        |row| row.get(0),
    )?;
    conn.execute(
        "INSERT INTO medications (id, owner_id, name, dosage, frequency, reminder_times, status, position)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            med.id.to_string(),
            med.owner_id.to_string(),
            med.name,
            med.dosage,
            med.frequency.as_str(),
            encode_times(&med.reminder_times)?,
            med.status.as_str(),
            position,
        ],
    )?;
    Ok(())
}

/// Overwrite a medication's editable fields. Position is kept.
pub fn update_medication(conn: &Connection, med: &Medication) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE medications
         SET name = ?1, dosage = ?2, frequency = ?3, reminder_times = ?4, status = ?5
         WHERE id = ?6 AND owner_id = ?7",
        params![
            med.name,
            med.dosage,
            med.frequency.as_str(),
            encode_times(&med.reminder_times)?,
            med.status.as_str(),
            med.id.to_string(),
            med.owner_id.to_string(),
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "Medication".into(),
            id: med.id.to_string(),
        });
    }
    Ok(())
}

/// All medications of an owner, in insertion order.
pub fn get_medications_for_owner(
    conn: &Connection,
    owner_id: &Uuid,
) -> Result<Vec<Medication>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, owner_id, name, dosage, frequency, reminder_times, status
         FROM medications WHERE owner_id = ?1
         ORDER BY position ASC",
    )?;

    let rows = stmt.query_map(params![owner_id.to_string()], |row| {
        Ok(medication_row_from_rusqlite(row))
    })?;

    let mut meds = Vec::new();
    for row in rows {
        meds.push(medication_from_row(row??)?);
    }
    Ok(meds)
}

pub fn delete_medication(
    conn: &Connection,
    owner_id: &Uuid,
    med_id: &Uuid,
) -> Result<(), DatabaseError> {
    conn.execute(
        "DELETE FROM medications WHERE id = ?1 AND owner_id = ?2",
        params![med_id.to_string(), owner_id.to_string()],
    )?;
    Ok(())
}

fn encode_times(times: &[NaiveTime]) -> Result<String, DatabaseError> {
    let formatted: Vec<String> = times.iter().map(|t| format_hhmm(*t)).collect();
    Ok(serde_json::to_string(&formatted)?)
}

fn decode_times(raw: &str) -> Result<Vec<NaiveTime>, DatabaseError> {
    let strings: Vec<String> = serde_json::from_str(raw)?;
    strings.iter().map(|s| parse_hhmm(s)).collect()
}

struct MedicationRow {
    id: String,
    owner_id: String,
    name: String,
    dosage: String,
    frequency: String,
    reminder_times: String,
    status: String,
}

fn medication_row_from_rusqlite(row: &rusqlite::Row<'_>) -> Result<MedicationRow, rusqlite::Error> {
    Ok(MedicationRow {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        dosage: row.get(3)?,
        frequency: row.get(4)?,
        reminder_times: row.get(5)?,
        status: row.get(6)?,
    })
}

fn medication_from_row(row: MedicationRow) -> Result<Medication, DatabaseError> {
    Ok(Medication {
        id: parse_uuid("medications.id", &row.id)?,
        owner_id: parse_uuid("medications.owner_id", &row.owner_id)?,
        name: row.name,
        dosage: row.dosage,
        frequency: Frequency::parse(&row.frequency),
        reminder_times: decode_times(&row.reminder_times)?,
        status: MedicationStatus::from_str(&row.status)?,
    })
}

pub(crate) fn parse_uuid(field: &str, raw: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(raw).map_err(|_| DatabaseError::InvalidValue {
        field: field.into(),
        value: raw.into(),
    })
}
