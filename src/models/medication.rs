use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{Frequency, MedicationStatus};
use super::time::hhmm_list;

/// A prescribed medication as owned by the medication list.
///
/// The reminder engine only reads it. A non-empty `reminder_times`
/// overrides the frequency's default schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub dosage: String,
    pub frequency: Frequency,
    #[serde(with = "hhmm_list", default)]
    pub reminder_times: Vec<NaiveTime>,
    pub status: MedicationStatus,
}

impl Medication {
    pub fn new(owner_id: Uuid, name: &str, dosage: &str, frequency: Frequency) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.to_string(),
            dosage: dosage.to_string(),
            frequency,
            reminder_times: Vec::new(),
            status: MedicationStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == MedicationStatus::Active
    }
}
