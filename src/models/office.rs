use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::time::hhmm_option;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "monday" => Some(Weekday::Monday),
            "tuesday" => Some(Weekday::Tuesday),
            "wednesday" => Some(Weekday::Wednesday),
            "thursday" => Some(Weekday::Thursday),
            "friday" => Some(Weekday::Friday),
            "saturday" => Some(Weekday::Saturday),
            "sunday" => Some(Weekday::Sunday),
            _ => None,
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Extra pickup or return hours around the normal window, for a flat surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtensionWindow {
    pub hours_before: u32,
    pub hours_after: u32,
    /// Flat fee charged once per booking side when the chosen time falls
    /// outside normal hours. Never prorated.
    pub flat_price: f64,
}

impl ExtensionWindow {
    pub fn new(hours_before: u32, hours_after: u32, flat_price: f64) -> Self {
        Self {
            hours_before,
            hours_after,
            flat_price,
        }
    }

    /// A zero-width extension adds no time and never surcharges.
    pub fn is_zero(&self) -> bool {
        self.hours_before == 0 && self.hours_after == 0
    }
}

/// One weekday's default schedule. Extensions are ignored when the day is
/// closed; `start_time == end_time` encodes an extension-only day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingDay {
    pub day: Weekday,
    pub is_open: bool,
    #[serde(default, with = "hhmm_option", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm_option", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_extension: Option<ExtensionWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_extension: Option<ExtensionWindow>,
}

impl WorkingDay {
    pub fn open(day: Weekday, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            day,
            is_open: true,
            start_time: Some(start_time),
            end_time: Some(end_time),
            pickup_extension: None,
            return_extension: None,
        }
    }

    pub fn closed(day: Weekday) -> Self {
        Self {
            day,
            is_open: false,
            start_time: None,
            end_time: None,
            pickup_extension: None,
            return_extension: None,
        }
    }

    pub fn with_pickup_extension(mut self, ext: ExtensionWindow) -> Self {
        self.pickup_extension = Some(ext);
        self
    }

    pub fn with_return_extension(mut self, ext: ExtensionWindow) -> Self {
        self.return_extension = Some(ext);
        self
    }
}

/// A one-off calendar-date override, matched by month and day so it recurs
/// every year. A match fully replaces the weekly schedule for that date;
/// special days never carry extensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialDay {
    pub month: u32,
    pub day: u32,
    pub is_open: bool,
    #[serde(default, with = "hhmm_option", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm_option", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SpecialDay {
    pub fn matches(&self, date: NaiveDate) -> bool {
        self.month == date.month() && self.day == date.day()
    }
}

/// Office identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OfficeId(String);

impl OfficeId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OfficeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for OfficeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A rental office: its weekly schedule plus sparse special-day overrides.
/// Reservations reference offices by id; an office never owns them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Office {
    pub id: OfficeId,
    pub name: String,
    #[serde(default)]
    pub working_days: Vec<WorkingDay>,
    #[serde(default)]
    pub special_days: Vec<SpecialDay>,
}

impl Office {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: OfficeId::generate(),
            name: name.into(),
            working_days: Vec::new(),
            special_days: Vec::new(),
        }
    }

    /// The weekly entry for a given weekday, if the office configured one.
    pub fn working_day(&self, day: Weekday) -> Option<&WorkingDay> {
        self.working_days.iter().find(|w| w.day == day)
    }

    /// The special-day override matching a calendar date, if any.
    pub fn special_day(&self, date: NaiveDate) -> Option<&SpecialDay> {
        self.special_days.iter().find(|s| s.matches(date))
    }

    /// Load an office document from a JSON file.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write an office document to a JSON file.
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time::parse_hhmm;

    #[test]
    fn test_weekday_roundtrip() {
        assert_eq!(Weekday::parse("wednesday"), Some(Weekday::Wednesday));
        assert_eq!(Weekday::parse("Wednesday"), None);
        assert_eq!(Weekday::from(chrono::Weekday::Sun), Weekday::Sunday);
        assert_eq!(Weekday::Saturday.to_string(), "saturday");
    }

    #[test]
    fn test_special_day_recurs_yearly() {
        let special = SpecialDay {
            month: 12,
            day: 25,
            is_open: false,
            start_time: None,
            end_time: None,
            reason: Some("Christmas".to_string()),
        };
        assert!(special.matches(NaiveDate::from_ymd_opt(2025, 12, 25).unwrap()));
        assert!(special.matches(NaiveDate::from_ymd_opt(2031, 12, 25).unwrap()));
        assert!(!special.matches(NaiveDate::from_ymd_opt(2025, 12, 24).unwrap()));
    }

    #[test]
    fn test_office_lookups() {
        let mut office = Office::new("Bristol Depot");
        office.working_days.push(WorkingDay::open(
            Weekday::Monday,
            parse_hhmm("09:00").unwrap(),
            parse_hhmm("17:00").unwrap(),
        ));
        assert!(office.working_day(Weekday::Monday).is_some());
        assert!(office.working_day(Weekday::Tuesday).is_none());
        assert!(office
            .special_day(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
            .is_none());
    }

    #[test]
    fn test_office_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("office.json");

        let mut office = Office::new("Leeds North");
        office.working_days.push(
            WorkingDay::open(
                Weekday::Friday,
                parse_hhmm("08:30").unwrap(),
                parse_hhmm("18:00").unwrap(),
            )
            .with_pickup_extension(ExtensionWindow::new(2, 1, 15.0)),
        );
        office.special_days.push(SpecialDay {
            month: 1,
            day: 1,
            is_open: false,
            start_time: None,
            end_time: None,
            reason: Some("New Year".to_string()),
        });

        office.save(&path).unwrap();
        let loaded = Office::load(&path).unwrap();
        assert_eq!(loaded.id, office.id);
        assert_eq!(loaded.working_days.len(), 1);
        let friday = loaded.working_day(Weekday::Friday).unwrap();
        assert_eq!(friday.start_time, parse_hhmm("08:30"));
        assert_eq!(friday.pickup_extension.unwrap().hours_before, 2);
        assert_eq!(loaded.special_days[0].reason.as_deref(), Some("New Year"));
    }

    #[test]
    fn test_hhmm_json_format() {
        let day = WorkingDay::open(
            Weekday::Monday,
            parse_hhmm("09:00").unwrap(),
            parse_hhmm("17:00").unwrap(),
        );
        let json = serde_json::to_string(&day).unwrap();
        assert!(json.contains("\"09:00\""), "times serialize as HH:MM: {}", json);
        let back: WorkingDay = serde_json::from_str(&json).unwrap();
        assert_eq!(back.end_time, parse_hhmm("17:00"));
    }
}
