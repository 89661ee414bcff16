//! Reminder lifecycle manager.
//!
//! Owns the working set of dose events for one owner and one date.
//!
//! ```text
//! upcoming ──mark_taken──► taken (terminal)
//!    │                        ▲
//!    └──snooze──► snoozed ────┘
//!                  │  ▲
//!                  └──┘ snooze
//! missed: stored only, no outgoing transition
//! ```
//!
//! Every mutation writes through the store first and touches memory only
//! after the store accepted it, so a store failure leaves the working set
//! exactly as it was.

use std::collections::HashSet;

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use uuid::Uuid;

use super::categorize::{categorize, summarize, CategorizedReminders, DaySummary};
use super::error::ReminderError;
use super::notify::{intent_for, NotificationIntent};
use super::schedule::generate;
use super::traits::{Clock, MedicationSource, NotificationSink, ReminderStore};
use crate::config::ReminderConfig;
use crate::models::enums::DoseStatus;
use crate::models::time::truncate_to_minute;
use crate::models::{DoseEvent, Medication, NotificationSettings, NotificationSettingsUpdate};

pub struct ReminderManager<S: ReminderStore, C: Clock> {
    owner_id: Uuid,
    store: S,
    clock: C,
    config: ReminderConfig,
    settings: NotificationSettings,
    sink: Option<Box<dyn NotificationSink>>,
    date: NaiveDate,
    events: Vec<DoseEvent>,
    /// (event, scheduled time) pairs already announced.
    announced: HashSet<(Uuid, NaiveTime)>,
    /// Snoozed events whose new time wrapped past midnight. They fall due
    /// on the following day.
    rolled_over: HashSet<Uuid>,
}

impl<S: ReminderStore, C: Clock> ReminderManager<S, C> {
    /// New manager for `owner_id` with an empty working set for today.
    /// Notification settings come from the store, or the config defaults.
    pub fn new(
        owner_id: Uuid,
        store: S,
        clock: C,
        config: ReminderConfig,
    ) -> Result<Self, ReminderError> {
        let settings = store
            .load_settings(&owner_id)?
            .unwrap_or(config.default_notifications);
        let date = clock.today();
        Ok(Self {
            owner_id,
            store,
            clock,
            config,
            settings,
            sink: None,
            date,
            events: Vec::new(),
            announced: HashSet::new(),
            rolled_over: HashSet::new(),
        })
    }

    pub fn with_sink(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn events(&self) -> &[DoseEvent] {
        &self.events
    }

    pub fn event(&self, id: &Uuid) -> Option<&DoseEvent> {
        self.events.iter().find(|e| &e.id == id)
    }

    pub fn settings(&self) -> NotificationSettings {
        self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // ── Working set ─────────────────────────────────────────

    /// Restore the persisted events of `date` as the working set.
    pub fn load(&mut self, date: NaiveDate) -> Result<&[DoseEvent], ReminderError> {
        let events = self.store.load_events(&self.owner_id, date)?;
        tracing::debug!(owner_id = %self.owner_id, %date, count = events.len(), "Loaded dose events");
        self.replace_working_set(date, events);
        Ok(&self.events)
    }

    /// Discard every event of `date` and rebuild it from `medications`.
    ///
    /// This is a full replacement: taken/snoozed progress already recorded
    /// for that date is lost.
    pub fn regenerate(
        &mut self,
        medications: &[Medication],
        date: NaiveDate,
    ) -> Result<&[DoseEvent], ReminderError> {
        let owned: Vec<Medication> = medications
            .iter()
            .filter(|m| {
                let mine = m.owner_id == self.owner_id;
                if !mine {
                    tracing::warn!(
                        owner_id = %self.owner_id,
                        medication_id = %m.id,
                        "Skipping medication of another owner"
                    );
                }
                mine
            })
            .cloned()
            .collect();

        let events = generate(&owned, date);
        self.store.save_events(&self.owner_id, date, &events)?;

        tracing::info!(
            owner_id = %self.owner_id,
            %date,
            medications = owned.len(),
            count = events.len(),
            "Regenerated daily reminders"
        );
        self.replace_working_set(date, events);
        Ok(&self.events)
    }

    /// Fetch the owner's medications and regenerate for the clock's today.
    pub fn refresh<M: MedicationSource + ?Sized>(
        &mut self,
        source: &M,
    ) -> Result<&[DoseEvent], ReminderError> {
        let medications = source.medications_for(&self.owner_id)?;
        let today = self.clock.today();
        self.regenerate(&medications, today)
    }

    /// `refresh` with the store itself as the medication source.
    pub fn refresh_from_store(&mut self) -> Result<&[DoseEvent], ReminderError>
    where
        S: MedicationSource,
    {
        let medications = self.store.medications_for(&self.owner_id)?;
        let today = self.clock.today();
        self.regenerate(&medications, today)
    }

    fn replace_working_set(&mut self, date: NaiveDate, events: Vec<DoseEvent>) {
        self.date = date;
        self.events = events;
        self.announced.clear();
        self.rolled_over.clear();
    }

    fn index_of(&self, id: &Uuid) -> Result<usize, ReminderError> {
        self.events
            .iter()
            .position(|e| &e.id == id)
            .ok_or(ReminderError::NotFound { id: *id })
    }

    // ── Transitions ─────────────────────────────────────────

    /// upcoming|snoozed → taken. Already taken is a no-op.
    pub fn mark_taken(&mut self, id: &Uuid) -> Result<DoseEvent, ReminderError> {
        let idx = self.index_of(id)?;
        match self.events[idx].status {
            DoseStatus::Taken => {
                tracing::debug!(event_id = %id, "Dose already taken");
                return Ok(self.events[idx].clone());
            }
            DoseStatus::Missed => {
                return Err(ReminderError::InvalidTransition {
                    id: *id,
                    from: DoseStatus::Missed,
                })
            }
            DoseStatus::Upcoming | DoseStatus::Snoozed => {}
        }

        self.store
            .update_event_status(&self.owner_id, id, DoseStatus::Taken, None)?;

        let event = &mut self.events[idx];
        event.status = DoseStatus::Taken;
        tracing::debug!(event_id = %id, medication = %event.medication_name, "Dose marked taken");
        Ok(event.clone())
    }

    /// upcoming|snoozed → snoozed, rescheduled to now + `minutes`.
    ///
    /// The new time wraps past midnight modulo 24h; the event keeps its date.
    pub fn snooze(&mut self, id: &Uuid, minutes: i64) -> Result<DoseEvent, ReminderError> {
        if minutes <= 0 {
            return Err(ReminderError::InvalidArgument(format!(
                "snooze minutes must be positive, got {minutes}"
            )));
        }
        let delta = TimeDelta::try_minutes(minutes).ok_or_else(|| {
            ReminderError::InvalidArgument(format!("snooze minutes out of range: {minutes}"))
        })?;

        let idx = self.index_of(id)?;
        let from = self.events[idx].status;
        if matches!(from, DoseStatus::Taken | DoseStatus::Missed) {
            return Err(ReminderError::InvalidTransition { id: *id, from });
        }

        let (wrapped, overflow_secs) = self.clock.time_of_day().overflowing_add_signed(delta);
        let new_time = truncate_to_minute(wrapped);

        self.store
            .update_event_status(&self.owner_id, id, DoseStatus::Snoozed, Some(new_time))?;

        let event = &mut self.events[idx];
        event.status = DoseStatus::Snoozed;
        event.scheduled_time = new_time;
        if overflow_secs != 0 {
            self.rolled_over.insert(*id);
        } else {
            self.rolled_over.remove(id);
        }
        tracing::debug!(event_id = %id, minutes, until = %new_time, "Dose snoozed");
        Ok(event.clone())
    }

    /// Snooze by the configured default length.
    pub fn snooze_default(&mut self, id: &Uuid) -> Result<DoseEvent, ReminderError> {
        self.snooze(id, self.config.default_snooze_minutes)
    }

    /// Drop every event of a deleted medication, on every date.
    /// Returns the number of stored events removed.
    pub fn remove_medication(&mut self, medication_id: &Uuid) -> Result<usize, ReminderError> {
        let removed = self
            .store
            .delete_medication_events(&self.owner_id, medication_id)?;
        self.events.retain(|e| &e.medication_id != medication_id);
        tracing::info!(owner_id = %self.owner_id, %medication_id, removed, "Removed medication reminders");
        Ok(removed)
    }

    // ── Queries ─────────────────────────────────────────────

    pub fn categorized(&self) -> CategorizedReminders {
        categorize(&self.events, self.clock.now())
    }

    pub fn summary(&self) -> DaySummary {
        summarize(
            &self.events,
            self.date,
            self.clock.now(),
            self.config.next_up_limit,
        )
    }

    // ── Notifications ───────────────────────────────────────

    pub fn update_notification_settings(
        &mut self,
        update: &NotificationSettingsUpdate,
    ) -> Result<NotificationSettings, ReminderError> {
        let merged = self.settings.merged(update);
        self.store.save_settings(&self.owner_id, &merged)?;
        self.settings = merged;
        Ok(merged)
    }

    /// Announce every due, unannounced dose on the enabled channels.
    ///
    /// A dose is due when it is upcoming or snoozed and its scheduled time
    /// has arrived. A snoozed dose is announced again at its new time, on
    /// the next day when the snooze wrapped past midnight.
    pub fn dispatch_due_notifications(&mut self) -> Vec<NotificationIntent> {
        let now = self.clock.now();
        let mut due: Vec<(NaiveDateTime, &DoseEvent)> = self
            .events
            .iter()
            .filter(|e| matches!(e.status, DoseStatus::Upcoming | DoseStatus::Snoozed))
            .map(|e| (self.due_at(e), e))
            .filter(|(at, _)| *at <= now)
            .filter(|(_, e)| !self.announced.contains(&(e.id, e.scheduled_time)))
            .collect();
        due.sort_by_key(|(at, _)| *at);

        let mut intents = Vec::new();
        for (_, event) in due {
            let Some(intent) = intent_for(event, &self.settings) else {
                continue;
            };
            if let Some(sink) = &self.sink {
                sink.emit(&intent);
            }
            self.announced.insert((event.id, event.scheduled_time));
            intents.push(intent);
        }
        intents
    }

    fn due_at(&self, event: &DoseEvent) -> NaiveDateTime {
        let at = event.scheduled_at();
        if event.status == DoseStatus::Snoozed && self.rolled_over.contains(&event.id) {
            at.checked_add_days(Days::new(1)).unwrap_or(at)
        } else {
            at
        }
    }
}
