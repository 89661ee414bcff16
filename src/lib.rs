pub mod config;
pub mod models;
pub mod db;
pub mod reminders; // Daily reminder generation and lifecycle

use std::path::Path;

use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use config::ReminderConfig;
use reminders::{ReminderError, ReminderManager, SqliteReminderStore, SystemClock};

/// Install the global fmt subscriber. `RUST_LOG` overrides the default
/// filter. Calling it again after a subscriber is set does nothing.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();

    tracing::info!("{} reminder engine v{}", config::APP_NAME, config::APP_VERSION);
}

pub type OwnerSession = ReminderManager<SqliteReminderStore, SystemClock>;

/// Open the per-owner database under the app data directory and build a
/// manager on the system clock.
pub fn open_owner_session(
    owner_id: Uuid,
    reminder_config: ReminderConfig,
) -> Result<OwnerSession, ReminderError> {
    open_session_at(&config::database_path(&owner_id), owner_id, reminder_config)
}

pub fn open_session_at(
    db_path: &Path,
    owner_id: Uuid,
    reminder_config: ReminderConfig,
) -> Result<OwnerSession, ReminderError> {
    let store = SqliteReminderStore::open(db_path)?;
    ReminderManager::new(owner_id, store, SystemClock, reminder_config)
}
