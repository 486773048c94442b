mod check;
mod hours;
mod slots;

pub use check::*;
pub use hours::*;
pub use slots::*;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::models::{time, ReservedSlot};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn print<T: Serialize + std::fmt::Display>(&self, value: &T) {
        match self {
            OutputFormat::Human => println!("{}", value),
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(value).unwrap());
            }
        }
    }
}

/// Parse a calendar date like "2026-08-10".
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'. Use: YYYY-MM-DD", s))
}

/// Parse a time of day like "09:30".
pub fn parse_time(s: &str) -> Result<NaiveTime> {
    time::parse_hhmm(s).with_context(|| format!("Invalid time '{}'. Use: HH:MM", s))
}

/// Load reservation fixtures from a JSON file holding an array of
/// reserved slots.
pub fn load_reservations(path: &std::path::Path) -> Result<Vec<ReservedSlot>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read reservations file {}", path.display()))?;
    serde_json::from_str(&content).context("Failed to parse reservations file")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2026-08-10").is_ok());
        assert!(parse_date("10/08/2026").is_err());
        assert!(parse_date("2026-13-01").is_err());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(
            parse_time("09:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert!(parse_time("9.30").is_err());
    }
}
