use chrono::{NaiveTime, Timelike};

/// First selectable instant of a day (00:00).
pub fn day_start() -> NaiveTime {
    NaiveTime::from_hms_opt(0, 0, 0).unwrap()
}

/// Last selectable instant of a day (23:59).
pub fn day_end() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap()
}

/// Parse a time like "09:30" (24h, zero-padded).
pub fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}

/// Format a time as "HH:MM".
pub fn fmt_hhmm(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Minutes since midnight, ignoring seconds.
pub fn minutes_of_day(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

/// Build a time from minutes since midnight, clamped to 23:59.
pub fn from_minutes(minutes: u32) -> NaiveTime {
    let m = minutes.min(23 * 60 + 59);
    NaiveTime::from_hms_opt(m / 60, m % 60, 0).unwrap()
}

/// Shift a time later, saturating at 23:59. No cross-midnight rollover.
pub fn add_minutes_clamped(t: NaiveTime, minutes: u32) -> NaiveTime {
    from_minutes(minutes_of_day(t) + minutes)
}

/// Shift a time earlier, saturating at 00:00.
pub fn sub_minutes_clamped(t: NaiveTime, minutes: u32) -> NaiveTime {
    from_minutes(minutes_of_day(t).saturating_sub(minutes))
}

/// Serde adapter: `NaiveTime` as an "HH:MM" string.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::fmt_hhmm(*t))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_hhmm(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid HH:MM time: {}", s)))
    }
}

/// Serde adapter: `Option<NaiveTime>` as an optional "HH:MM" string.
pub mod hhmm_option {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        t: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match t {
            Some(t) => serializer.serialize_some(&super::fmt_hhmm(*t)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let s: Option<String> = Option::deserialize(deserializer)?;
        match s {
            Some(s) => super::parse_hhmm(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid HH:MM time: {}", s))),
            None => Ok(None),
        }
    }
}
