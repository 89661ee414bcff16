//! Frequency resolver: dosing cadence → times of day.

use chrono::NaiveTime;

use crate::models::enums::Frequency;
use crate::models::time::hm;

/// Times of day for one medication.
///
/// A non-empty `explicit` list is returned unchanged. Otherwise the
/// frequency's default table applies; `AsNeeded` yields nothing and an
/// unrecognized frequency yields a single 08:00 dose.
pub fn resolve_times(frequency: &Frequency, explicit: &[NaiveTime]) -> Vec<NaiveTime> {
    if !explicit.is_empty() {
        return explicit.to_vec();
    }
    default_times(frequency)
}

pub fn default_times(frequency: &Frequency) -> Vec<NaiveTime> {
    match frequency {
        Frequency::Once => vec![hm(8, 0)],
        Frequency::Twice => vec![hm(8, 0), hm(20, 0)],
        Frequency::Thrice => vec![hm(8, 0), hm(14, 0), hm(20, 0)],
        Frequency::Every4Hours => vec![hm(6, 0), hm(10, 0), hm(14, 0), hm(18, 0), hm(22, 0)],
        // The last dose of the cycle is the midnight one.
        Frequency::Every6Hours => vec![hm(6, 0), hm(12, 0), hm(18, 0), hm(0, 0)],
        Frequency::Every8Hours => vec![hm(6, 0), hm(14, 0), hm(22, 0)],
        Frequency::AsNeeded => Vec::new(),
        Frequency::Unrecognized(_) => vec![hm(8, 0)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time::format_hhmm;

    fn labels(times: &[NaiveTime]) -> Vec<String> {
        times.iter().map(|t| format_hhmm(*t)).collect()
    }

    #[test]
    fn default_table() {
        let cases: &[(Frequency, &[&str])] = &[
            (Frequency::Once, &["08:00"]),
            (Frequency::Twice, &["08:00", "20:00"]),
            (Frequency::Thrice, &["08:00", "14:00", "20:00"]),
            (Frequency::Every4Hours, &["06:00", "10:00", "14:00", "18:00", "22:00"]),
            (Frequency::Every6Hours, &["06:00", "12:00", "18:00", "00:00"]),
            (Frequency::Every8Hours, &["06:00", "14:00", "22:00"]),
            (Frequency::AsNeeded, &[]),
            (Frequency::Unrecognized("fortnightly".into()), &["08:00"]),
        ];
        for (freq, expected) in cases {
            assert_eq!(labels(&resolve_times(freq, &[])), *expected, "frequency {freq}");
        }
    }

    #[test]
    fn default_tables_have_no_duplicates() {
        for freq in [
            Frequency::Once,
            Frequency::Twice,
            Frequency::Thrice,
            Frequency::Every4Hours,
            Frequency::Every6Hours,
            Frequency::Every8Hours,
        ] {
            let mut times = default_times(&freq);
            let len = times.len();
            times.sort();
            times.dedup();
            assert_eq!(times.len(), len, "duplicate in {freq}");
        }
    }

    #[test]
    fn explicit_times_override_frequency() {
        let explicit = vec![hm(21, 30), hm(7, 15)];
        assert_eq!(resolve_times(&Frequency::Thrice, &explicit), explicit);
        assert_eq!(resolve_times(&Frequency::AsNeeded, &explicit), explicit);
    }
}
