use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::time::hhmm;

/// Where a day's effective window came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowSource {
    /// A special-day override supplied the hours.
    Special,
    /// The weekly working-day schedule supplied the hours.
    Working,
    /// The office is closed for the date.
    Closed,
}

impl WindowSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowSource::Special => "special",
            WindowSource::Working => "working",
            WindowSource::Closed => "closed",
        }
    }
}

impl std::fmt::Display for WindowSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An open/close pair, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl OpeningHours {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, t: NaiveTime) -> bool {
        t >= self.start && t <= self.end
    }
}

impl std::fmt::Display for OpeningHours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}",
            super::time::fmt_hhmm(self.start),
            super::time::fmt_hhmm(self.end)
        )
    }
}

/// One selectable time, flagged when it collides with an existing
/// reservation. Reserved entries stay in the list so a picker can render
/// them disabled rather than missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotAvailability {
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub reserved: bool,
}

/// Pricing signal for the extension region of a day: the normal
/// (non-extended) hours and the flat fee charged outside them. Price
/// composition must use this emitted value as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurchargeRule {
    pub normal: OpeningHours,
    pub flat_price: f64,
}

impl SurchargeRule {
    /// A chosen time is surcharged iff strictly outside the normal window.
    /// Boundary instants are inside it and free.
    pub fn applies_to(&self, t: NaiveTime) -> bool {
        !self.normal.contains(t)
    }

    /// Flat fee for a chosen time, zero inside normal hours.
    pub fn price_for(&self, t: NaiveTime) -> f64 {
        if self.applies_to(t) {
            self.flat_price
        } else {
            0.0
        }
    }
}

/// Full engine output for one office, date, and booking side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayAvailability {
    pub source: WindowSource,
    /// Human-readable working-hours text for display, or a closure reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    pub slots: Vec<SlotAvailability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surcharge: Option<SurchargeRule>,
}

impl DayAvailability {
    pub fn closed(info: Option<String>) -> Self {
        Self {
            source: WindowSource::Closed,
            info,
            slots: Vec::new(),
            surcharge: None,
        }
    }

    /// An empty slot list is a valid outcome, not an error.
    pub fn has_slots(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Earliest slot not blocked by an existing reservation.
    pub fn first_available(&self) -> Option<NaiveTime> {
        self.slots.iter().find(|s| !s.reserved).map(|s| s.time)
    }

    /// Extension fee for a chosen time; zero when the day has no active
    /// extension or the time falls inside normal hours.
    pub fn surcharge_for(&self, t: NaiveTime) -> f64 {
        self.surcharge.map(|rule| rule.price_for(t)).unwrap_or(0.0)
    }

    /// Whether a time is offered and not reserved.
    pub fn offers(&self, t: NaiveTime) -> bool {
        self.slots.iter().any(|s| s.time == t && !s.reserved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time::parse_hhmm;

    #[test]
    fn test_surcharge_boundary_inclusive() {
        let rule = SurchargeRule {
            normal: OpeningHours::new(parse_hhmm("09:00").unwrap(), parse_hhmm("17:00").unwrap()),
            flat_price: 25.0,
        };
        assert!(!rule.applies_to(parse_hhmm("09:00").unwrap()));
        assert!(!rule.applies_to(parse_hhmm("17:00").unwrap()));
        assert!(rule.applies_to(parse_hhmm("08:45").unwrap()));
        assert!(rule.applies_to(parse_hhmm("17:15").unwrap()));
        assert_eq!(rule.price_for(parse_hhmm("08:00").unwrap()), 25.0);
        assert_eq!(rule.price_for(parse_hhmm("12:00").unwrap()), 0.0);
    }

    #[test]
    fn test_first_available_skips_reserved() {
        let avail = DayAvailability {
            source: WindowSource::Working,
            info: None,
            slots: vec![
                SlotAvailability {
                    time: parse_hhmm("09:00").unwrap(),
                    reserved: true,
                },
                SlotAvailability {
                    time: parse_hhmm("09:15").unwrap(),
                    reserved: false,
                },
            ],
            surcharge: None,
        };
        assert_eq!(avail.first_available(), parse_hhmm("09:15"));
        assert!(!avail.offers(parse_hhmm("09:00").unwrap()));
        assert!(avail.offers(parse_hhmm("09:15").unwrap()));
    }
}
