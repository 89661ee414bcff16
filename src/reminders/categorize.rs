//! Query-time classification of dose events.
//!
//! Nothing here mutates status: an overdue dose is still stored as
//! `upcoming` and only *reported* as current/overdue relative to `now`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::enums::DoseStatus;
use crate::models::DoseEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderCategory {
    /// Not yet due.
    Upcoming,
    /// Due or past due, not acted on.
    Current,
    Taken,
    Missed,
    Snoozed,
}

/// Events bucketed for the reminder screen, each bucket sorted by time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategorizedReminders {
    pub upcoming: Vec<DoseEvent>,
    pub current: Vec<DoseEvent>,
    pub taken: Vec<DoseEvent>,
    pub missed: Vec<DoseEvent>,
    pub snoozed: Vec<DoseEvent>,
}

impl CategorizedReminders {
    pub fn len(&self) -> usize {
        self.upcoming.len()
            + self.current.len()
            + self.taken.len()
            + self.missed.len()
            + self.snoozed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn classify(event: &DoseEvent, now: NaiveDateTime) -> ReminderCategory {
    match event.status {
        DoseStatus::Upcoming if event.scheduled_at() > now => ReminderCategory::Upcoming,
        DoseStatus::Upcoming => ReminderCategory::Current,
        DoseStatus::Taken => ReminderCategory::Taken,
        DoseStatus::Missed => ReminderCategory::Missed,
        DoseStatus::Snoozed => ReminderCategory::Snoozed,
    }
}

pub fn categorize(events: &[DoseEvent], now: NaiveDateTime) -> CategorizedReminders {
    let mut out = CategorizedReminders::default();
    for event in events {
        let bucket = match classify(event, now) {
            ReminderCategory::Upcoming => &mut out.upcoming,
            ReminderCategory::Current => &mut out.current,
            ReminderCategory::Taken => &mut out.taken,
            ReminderCategory::Missed => &mut out.missed,
            ReminderCategory::Snoozed => &mut out.snoozed,
        };
        bucket.push(event.clone());
    }
    for bucket in [
        &mut out.upcoming,
        &mut out.current,
        &mut out.taken,
        &mut out.missed,
        &mut out.snoozed,
    ] {
        bucket.sort_by_key(DoseEvent::scheduled_at);
    }
    out
}

/// Passive "missed": still `upcoming`, on today's date, strictly in the past.
pub fn is_overdue(event: &DoseEvent, now: NaiveDateTime) -> bool {
    event.status == DoseStatus::Upcoming
        && event.date == now.date()
        && event.scheduled_at() < now
}

/// Dashboard counters for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub total: usize,
    /// Everything not yet taken.
    pub outstanding: usize,
    pub overdue: usize,
    /// First `limit` `upcoming`-status events by time, overdue included.
    pub next_up: Vec<DoseEvent>,
}

pub fn summarize(
    events: &[DoseEvent],
    date: NaiveDate,
    now: NaiveDateTime,
    limit: usize,
) -> DaySummary {
    let mut next_up: Vec<DoseEvent> = events
        .iter()
        .filter(|e| e.status == DoseStatus::Upcoming)
        .cloned()
        .collect();
    next_up.sort_by_key(DoseEvent::scheduled_at);
    next_up.truncate(limit);

    DaySummary {
        date,
        total: events.len(),
        outstanding: events.iter().filter(|e| e.status != DoseStatus::Taken).count(),
        overdue: events.iter().filter(|e| is_overdue(e, now)).count(),
        next_up,
    }
}
