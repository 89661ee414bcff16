use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::DoseStatus;
use super::medication::Medication;
use super::time::hhmm;

/// Namespace for dose event ids. Changing it changes every derived id.
pub const DOSE_EVENT_NAMESPACE: Uuid = Uuid::from_u128(0x5c1e_7a0d_84b2_4f3e_9a61_d2c8_0b7e_4f19);

/// One scheduled intake of a medication on a given date.
///
/// `medication_name` and `dosage` are copied at generation time and do not
/// follow later edits to the medication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoseEvent {
    pub id: Uuid,
    pub medication_id: Uuid,
    pub medication_name: String,
    pub dosage: String,
    #[serde(with = "hhmm")]
    pub scheduled_time: NaiveTime,
    pub status: DoseStatus,
    pub date: NaiveDate,
    /// Position of this time in the medication's resolved schedule.
    pub ordinal: u32,
}

impl DoseEvent {
    /// Fresh `upcoming` event for one slot of a medication's day.
    pub fn scheduled(med: &Medication, date: NaiveDate, ordinal: u32, time: NaiveTime) -> Self {
        Self {
            id: dose_event_id(&med.id, date, ordinal),
            medication_id: med.id,
            medication_name: med.name.clone(),
            dosage: med.dosage.clone(),
            scheduled_time: time,
            status: DoseStatus::Upcoming,
            date,
            ordinal,
        }
    }

    pub fn scheduled_at(&self) -> NaiveDateTime {
        self.date.and_time(self.scheduled_time)
    }
}

/// Deterministic id from (medication, date, ordinal).
pub fn dose_event_id(medication_id: &Uuid, date: NaiveDate, ordinal: u32) -> Uuid {
    let key = format!("{medication_id}:{date}:{ordinal}");
    Uuid::new_v5(&DOSE_EVENT_NAMESPACE, key.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::Frequency;
    use crate::models::time::hm;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn id_is_stable_for_same_inputs() {
        let med_id = Uuid::new_v4();
        let a = dose_event_id(&med_id, date(2025, 1, 1), 0);
        let b = dose_event_id(&med_id, date(2025, 1, 1), 0);
        assert_eq!(a, b);
    }

    #[test]
    fn id_differs_by_date_and_ordinal() {
        let med_id = Uuid::new_v4();
        let base = dose_event_id(&med_id, date(2025, 1, 1), 0);
        assert_ne!(base, dose_event_id(&med_id, date(2025, 1, 2), 0));
        assert_ne!(base, dose_event_id(&med_id, date(2025, 1, 1), 1));
        assert_ne!(base, dose_event_id(&Uuid::new_v4(), date(2025, 1, 1), 0));
    }

    #[test]
    fn scheduled_event_snapshots_medication() {
        let mut med = Medication::new(Uuid::new_v4(), "Aspirin", "81mg", Frequency::Once);
        let event = DoseEvent::scheduled(&med, date(2025, 1, 1), 0, hm(8, 0));
        med.name = "Aspirin EC".into();
        assert_eq!(event.medication_name, "Aspirin");
        assert_eq!(event.status, DoseStatus::Upcoming);
        assert_eq!(event.scheduled_at(), date(2025, 1, 1).and_time(hm(8, 0)));
    }

    #[test]
    fn serializes_time_as_hhmm() {
        let med = Medication::new(Uuid::new_v4(), "Aspirin", "81mg", Frequency::Once);
        let event = DoseEvent::scheduled(&med, date(2025, 1, 1), 0, hm(8, 0));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["scheduled_time"], "08:00");
        assert_eq!(json["status"], "upcoming");
        assert_eq!(json["date"], "2025-01-01");
    }
}
