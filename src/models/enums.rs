use std::convert::Infallible;

use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(MedicationStatus {
    Active => "active",
    Completed => "completed",
    Paused => "paused",
});

str_enum!(DoseStatus {
    Upcoming => "upcoming",
    Taken => "taken",
    Missed => "missed",
    Snoozed => "snoozed",
});

str_enum!(NotificationChannel {
    Sms => "sms",
    Email => "email",
    InApp => "in_app",
});

impl NotificationChannel {
    pub fn all() -> &'static [NotificationChannel] {
        &[Self::Sms, Self::Email, Self::InApp]
    }
}

// ═══════════════════════════════════════════
// Frequency — lenient, never fails to parse
// ═══════════════════════════════════════════

/// Dosing cadence of a medication.
///
/// Unknown strings are kept as `Unrecognized` so that a stored value the
/// engine does not understand still schedules a single morning dose and
/// round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    Once,
    Twice,
    Thrice,
    Every4Hours,
    Every6Hours,
    Every8Hours,
    AsNeeded,
    Unrecognized(String),
}

impl Frequency {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Once => "once",
            Self::Twice => "twice",
            Self::Thrice => "thrice",
            Self::Every4Hours => "every_4h",
            Self::Every6Hours => "every_6h",
            Self::Every8Hours => "every_8h",
            Self::AsNeeded => "as_needed",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Parse a frequency, accepting the canonical snake-case names and the
    /// legacy camel-case spellings (`every4h`, `asNeeded`).
    pub fn parse(s: &str) -> Self {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "once" | "once_daily" => Self::Once,
            "twice" | "twice_daily" => Self::Twice,
            "thrice" | "three_times_daily" => Self::Thrice,
            "every_4h" | "every4h" | "every_4_hours" => Self::Every4Hours,
            "every_6h" | "every6h" | "every_6_hours" => Self::Every6Hours,
            "every_8h" | "every8h" | "every_8_hours" => Self::Every8Hours,
            "as_needed" | "asneeded" | "prn" => Self::AsNeeded,
            _ => {
                tracing::warn!(value = s, "Unrecognized frequency, using default schedule");
                Self::Unrecognized(s.to_string())
            }
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl std::str::FromStr for Frequency {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for Frequency {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<Frequency> for String {
    fn from(f: Frequency) -> Self {
        f.as_str().to_string()
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
