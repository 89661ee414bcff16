//! Notification intents for due doses.
//!
//! The engine only decides *that* a dose should be announced and on which
//! channels. SMS, email and push delivery consume the intents elsewhere.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

use super::traits::NotificationSink;
use crate::models::enums::NotificationChannel;
use crate::models::time::hhmm;
use crate::models::{DoseEvent, NotificationSettings};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationIntent {
    pub event_id: Uuid,
    pub medication_name: String,
    pub dosage: String,
    #[serde(with = "hhmm")]
    pub scheduled_time: NaiveTime,
    pub channels: Vec<NotificationChannel>,
}

/// Intent for `event` on the enabled channels, `None` if every channel is off.
pub fn intent_for(event: &DoseEvent, settings: &NotificationSettings) -> Option<NotificationIntent> {
    let channels = settings.enabled_channels();
    if channels.is_empty() {
        return None;
    }
    Some(NotificationIntent {
        event_id: event.id,
        medication_name: event.medication_name.clone(),
        dosage: event.dosage.clone(),
        scheduled_time: event.scheduled_time,
        channels,
    })
}

/// Sink that forwards intents into an unbounded tokio channel.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<NotificationIntent>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<NotificationIntent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationSink for ChannelSink {
    fn emit(&self, intent: &NotificationIntent) {
        if self.tx.send(intent.clone()).is_err() {
            tracing::warn!(event_id = %intent.event_id, "Notification receiver closed, intent dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::Frequency;
    use crate::models::time::hm;
    use crate::models::Medication;
    use chrono::NaiveDate;

    fn event() -> DoseEvent {
        let med = Medication::new(Uuid::new_v4(), "Aspirin", "81mg", Frequency::Once);
        DoseEvent::scheduled(&med, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), 0, hm(8, 0))
    }

    #[test]
    fn intent_lists_enabled_channels() {
        let settings = NotificationSettings { sms: false, email: true, in_app: true };
        let intent = intent_for(&event(), &settings).unwrap();
        assert_eq!(
            intent.channels,
            vec![NotificationChannel::Email, NotificationChannel::InApp]
        );
        assert_eq!(intent.medication_name, "Aspirin");
    }

    #[test]
    fn no_channels_no_intent() {
        let settings = NotificationSettings { sms: false, email: false, in_app: false };
        assert!(intent_for(&event(), &settings).is_none());
    }

    #[test]
    fn channel_sink_forwards() {
        let (sink, mut rx) = ChannelSink::new();
        let intent = intent_for(&event(), &NotificationSettings::default()).unwrap();
        sink.emit(&intent);
        assert_eq!(rx.try_recv().unwrap(), intent);
    }

    #[test]
    fn closed_receiver_is_ignored() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);
        let intent = intent_for(&event(), &NotificationSettings::default()).unwrap();
        sink.emit(&intent);
    }

    #[tokio::test]
    async fn receiver_can_be_awaited() {
        let (sink, mut rx) = ChannelSink::new();
        let intent = intent_for(&event(), &NotificationSettings::default()).unwrap();
        sink.emit(&intent);
        drop(sink);
        assert_eq!(rx.recv().await, Some(intent));
        assert_eq!(rx.recv().await, None);
    }
}
