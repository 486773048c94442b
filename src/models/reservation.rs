use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::time::{self, hhmm};

/// Which side of a booking a time list is for: pickup slots are resolved
/// against the rental's start date, return slots against its end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotRole {
    Pickup,
    Return,
}

impl SlotRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotRole::Pickup => "pickup",
            SlotRole::Return => "return",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pickup" | "start" => Some(SlotRole::Pickup),
            "return" | "end" => Some(SlotRole::Return),
            _ => None,
        }
    }
}

impl std::fmt::Display for SlotRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One existing reservation's time footprint, as supplied by the
/// reservation lookup for a single queried date. Read-only input; the
/// engine never creates or stores these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservedSlot {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub is_same_day: bool,
}

impl ReservedSlot {
    pub fn new(
        start_date: NaiveDate,
        start_time: NaiveTime,
        end_date: NaiveDate,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            start_date,
            end_date,
            start_time,
            end_time,
            is_same_day: start_date == end_date,
        }
    }

    /// Interval this reservation blocks on the queried date, inclusive on
    /// both ends. A same-day rental blocks only its own span; a multi-day
    /// one blocks from its start time to end of day on the pickup side and
    /// from start of day to its end time on the return side.
    pub fn blocked_range(&self, role: SlotRole) -> (NaiveTime, NaiveTime) {
        if self.is_same_day {
            return (self.start_time, self.end_time);
        }
        match role {
            SlotRole::Pickup => (self.start_time, time::day_end()),
            SlotRole::Return => (time::day_start(), self.end_time),
        }
    }

    /// Whether a candidate time collides with this reservation.
    pub fn blocks(&self, t: NaiveTime, role: SlotRole) -> bool {
        let (start, end) = self.blocked_range(role);
        t >= start && t <= end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time::parse_hhmm;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_same_day_blocks_only_its_span() {
        let slot = ReservedSlot::new(
            date(2026, 8, 10),
            parse_hhmm("10:00").unwrap(),
            date(2026, 8, 10),
            parse_hhmm("16:00").unwrap(),
        );
        assert!(slot.is_same_day);
        assert!(slot.blocks(parse_hhmm("10:00").unwrap(), SlotRole::Pickup));
        assert!(slot.blocks(parse_hhmm("16:00").unwrap(), SlotRole::Pickup));
        assert!(!slot.blocks(parse_hhmm("09:45").unwrap(), SlotRole::Pickup));
        assert!(!slot.blocks(parse_hhmm("16:15").unwrap(), SlotRole::Return));
    }

    #[test]
    fn test_multi_day_blocks_to_day_edges() {
        let slot = ReservedSlot::new(
            date(2026, 8, 10),
            parse_hhmm("14:00").unwrap(),
            date(2026, 8, 12),
            parse_hhmm("11:00").unwrap(),
        );
        assert!(!slot.is_same_day);
        // pickup side: gone from 14:00 onwards
        assert!(slot.blocks(parse_hhmm("23:45").unwrap(), SlotRole::Pickup));
        assert!(!slot.blocks(parse_hhmm("13:45").unwrap(), SlotRole::Pickup));
        // return side: occupied until 11:00
        assert!(slot.blocks(parse_hhmm("00:00").unwrap(), SlotRole::Return));
        assert!(slot.blocks(parse_hhmm("11:00").unwrap(), SlotRole::Return));
        assert!(!slot.blocks(parse_hhmm("11:15").unwrap(), SlotRole::Return));
    }

    #[test]
    fn test_role_parse_accepts_both_spellings() {
        assert_eq!(SlotRole::parse("pickup"), Some(SlotRole::Pickup));
        assert_eq!(SlotRole::parse("start"), Some(SlotRole::Pickup));
        assert_eq!(SlotRole::parse("end"), Some(SlotRole::Return));
        assert_eq!(SlotRole::parse("dropoff"), None);
    }
}
