use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{load_reservations, parse_date, OutputFormat};
use crate::lookup::{AvailabilityService, StaticDirectory, StaticReservations};
use crate::models::time::fmt_hhmm;
use crate::models::{DayAvailability, Office, SlotRole};

/// Response from a slot-list query
#[derive(Debug, Serialize, Deserialize)]
pub struct SlotsResponse {
    pub office: String,
    pub date: NaiveDate,
    pub role: SlotRole,
    pub availability: DayAvailability,
}

impl std::fmt::Display for SlotsResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} {} slots for {} ({}):",
            self.office,
            self.role,
            self.date.format("%a %Y-%m-%d"),
            self.availability.info.as_deref().unwrap_or("closed")
        )?;
        if !self.availability.has_slots() {
            writeln!(f, "  No times available on this date.")?;
            return Ok(());
        }
        for slot in &self.availability.slots {
            write!(f, "  {}", fmt_hhmm(slot.time))?;
            if slot.reserved {
                write!(f, " (reserved)")?;
            }
            let fee = self.availability.surcharge_for(slot.time);
            if fee > 0.0 {
                write!(f, " (+{:.2} extension fee)", fee)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// List the selectable times for one office, date, and booking side.
pub async fn run_slots(
    office_path: &Path,
    date: &str,
    role: &str,
    reservations_path: Option<&Path>,
    interval_minutes: u32,
    format: OutputFormat,
) -> Result<()> {
    let office = Office::load(office_path)?;
    let date = parse_date(date)?;
    let role = SlotRole::parse(role)
        .with_context(|| format!("Invalid role '{}'. Use: pickup or return", role))?;
    let reserved = match reservations_path {
        Some(path) => load_reservations(path)?,
        None => Vec::new(),
    };

    let office_name = office.name.clone();
    let office_id = office.id.clone();
    let service = AvailabilityService::new(
        StaticDirectory::new([office]),
        StaticReservations::new(reserved),
    );
    let availability = service
        .day_availability(&office_id, date, role, interval_minutes)
        .await?;

    let response = SlotsResponse {
        office: office_name,
        date,
        role,
        availability,
    };
    format.print(&response);
    Ok(())
}
