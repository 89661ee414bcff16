//! Time-of-day helpers. Reminder times are stored and exchanged as `HH:MM`.

use chrono::{NaiveTime, Timelike};

use crate::db::DatabaseError;

/// Parse an `HH:MM` (or `H:MM`) string into a time of day.
pub fn parse_hhmm(s: &str) -> Result<NaiveTime, DatabaseError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|_| DatabaseError::InvalidTime(s.into()))
}

/// Format a time of day as zero-padded `HH:MM`. Seconds are dropped.
pub fn format_hhmm(t: NaiveTime) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

/// Drop seconds and sub-seconds; stored times have minute precision.
pub fn truncate_to_minute(t: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(t.hour(), t.minute(), 0).unwrap_or(t)
}

/// Build a time from hour/minute literals used in the default tables.
pub(crate) fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// serde adapter for a single `NaiveTime` as `HH:MM`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_hhmm(*t))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_hhmm(&raw).map_err(serde::de::Error::custom)
    }
}

/// serde adapter for `Vec<NaiveTime>` as a list of `HH:MM` strings.
pub mod hhmm_list {
    use chrono::NaiveTime;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(times: &[NaiveTime], s: S) -> Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(times.len()))?;
        for t in times {
            seq.serialize_element(&super::format_hhmm(*t))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<NaiveTime>, D::Error> {
        let raw = Vec::<String>::deserialize(d)?;
        raw.iter()
            .map(|s| super::parse_hhmm(s).map_err(serde::de::Error::custom))
            .collect()
    }
}
