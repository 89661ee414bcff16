//! Schedule generator: active medications + date → that day's dose events.

use chrono::NaiveDate;

use super::frequency::resolve_times;
use crate::models::{DoseEvent, Medication};

/// Build the dose events of `date` for every active medication.
///
/// Events are grouped by medication in input order and sorted by time
/// within each medication. Each event keeps the ordinal of its time in the
/// resolved list, so ids stay stable however the times were ordered. A time
/// listed twice produces one event.
pub fn generate(medications: &[Medication], date: NaiveDate) -> Vec<DoseEvent> {
    let mut events = Vec::new();

    for med in medications.iter().filter(|m| m.is_active()) {
        let times = resolve_times(&med.frequency, &med.reminder_times);

        let mut slots: Vec<(u32, chrono::NaiveTime)> = Vec::with_capacity(times.len());
        for (ordinal, time) in times.into_iter().enumerate() {
            if slots.iter().any(|(_, t)| *t == time) {
                tracing::warn!(
                    medication_id = %med.id,
                    time = %time,
                    "Duplicate reminder time ignored"
                );
                continue;
            }
            slots.push((ordinal as u32, time));
        }
        slots.sort_by_key(|(_, t)| *t);

        events.extend(
            slots
                .into_iter()
                .map(|(ordinal, time)| DoseEvent::scheduled(med, date, ordinal, time)),
        );
    }

    events
}
