use serde::{Deserialize, Serialize};

use super::enums::NotificationChannel;

/// Per-owner delivery channel switches. All channels start enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub sms: bool,
    pub email: bool,
    pub in_app: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            sms: true,
            email: true,
            in_app: true,
        }
    }
}

/// Partial update; `None` leaves the current value untouched.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct NotificationSettingsUpdate {
    pub sms: Option<bool>,
    pub email: Option<bool>,
    pub in_app: Option<bool>,
}

impl NotificationSettings {
    pub fn is_enabled(&self, channel: NotificationChannel) -> bool {
        match channel {
            NotificationChannel::Sms => self.sms,
            NotificationChannel::Email => self.email,
            NotificationChannel::InApp => self.in_app,
        }
    }

    pub fn enabled_channels(&self) -> Vec<NotificationChannel> {
        NotificationChannel::all()
            .iter()
            .copied()
            .filter(|c| self.is_enabled(*c))
            .collect()
    }

    pub fn merged(&self, update: &NotificationSettingsUpdate) -> Self {
        Self {
            sms: update.sms.unwrap_or(self.sms),
            email: update.email.unwrap_or(self.email),
            in_app: update.in_app.unwrap_or(self.in_app),
        }
    }
}
