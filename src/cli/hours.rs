use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{parse_date, OutputFormat};
use crate::engine::resolve_window;
use crate::models::{Office, WindowSource};

/// Response from a working-hours query
#[derive(Debug, Serialize, Deserialize)]
pub struct HoursResponse {
    pub office: String,
    pub date: NaiveDate,
    pub source: WindowSource,
    pub info: Option<String>,
}

impl std::fmt::Display for HoursResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} on {}: {}",
            self.office,
            self.date.format("%a %Y-%m-%d"),
            self.info.as_deref().unwrap_or("Closed")
        )?;
        if self.source == WindowSource::Special {
            write!(f, " [special day]")?;
        }
        Ok(())
    }
}

/// Show the effective opening hours of an office on a date.
pub fn run_hours(office_path: &Path, date: &str, format: OutputFormat) -> Result<()> {
    let office = Office::load(office_path)?;
    let date = parse_date(date)?;
    let window = resolve_window(&office, date);

    let response = HoursResponse {
        office: office.name,
        date,
        source: window.source,
        info: window.info,
    };
    format.print(&response);
    Ok(())
}
