use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{load_reservations, parse_date, parse_time, OutputFormat};
use crate::booking::{AgePolicy, BookingDraft, BookingEvent};
use crate::engine::day_availability;
use crate::models::time::fmt_hhmm;
use crate::models::{Office, SlotRole};
use crate::DEFAULT_SLOT_INTERVAL_MINUTES;

/// Response from a booking-draft check
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    pub pickup_fee: f64,
    pub return_fee: f64,
}

impl std::fmt::Display for CheckResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(problem) = &self.problem {
            return write!(f, "Booking rejected: {}", problem);
        }
        write!(f, "Booking is valid.")?;
        let total = self.pickup_fee + self.return_fee;
        if total > 0.0 {
            write!(
                f,
                " Extension fees: pickup +{:.2}, return +{:.2} (total +{:.2})",
                self.pickup_fee, self.return_fee, total
            )?;
        }
        Ok(())
    }
}

/// Validate a prospective booking end to end: drive the draft state
/// machine, confirm both chosen times are actually offered on their
/// dates, and report the extension fees the choice incurs.
#[allow(clippy::too_many_arguments)]
pub fn run_check(
    office_path: &Path,
    pickup_date: &str,
    pickup_time: &str,
    return_date: &str,
    return_time: &str,
    age: u8,
    reservations_path: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let office = Office::load(office_path)?;
    let pickup_date = parse_date(pickup_date)?;
    let return_date = parse_date(return_date)?;
    let pickup_time = parse_time(pickup_time)?;
    let return_time = parse_time(return_time)?;
    let reserved = match reservations_path {
        Some(path) => load_reservations(path)?,
        None => Vec::new(),
    };

    let policy = AgePolicy::default();
    let events = [
        BookingEvent::SelectOffice(office.id.clone()),
        BookingEvent::SelectDates {
            pickup_date,
            return_date,
        },
        BookingEvent::SelectPickupTime(pickup_time),
        BookingEvent::SelectReturnTime(return_time),
        BookingEvent::SetDriverAge(age),
    ];
    let mut draft = BookingDraft::new();
    for event in events {
        let (next, error) = draft.apply(event, &policy);
        if let Some(error) = error {
            format.print(&CheckResponse {
                valid: false,
                problem: Some(error.to_string()),
                pickup_fee: 0.0,
                return_fee: 0.0,
            });
            return Ok(());
        }
        draft = next;
    }

    // the engine expects reservations pre-scoped to the queried date+role
    let starting_that_day: Vec<_> = reserved
        .iter()
        .filter(|r| r.start_date == pickup_date)
        .cloned()
        .collect();
    let ending_that_day: Vec<_> = reserved
        .iter()
        .filter(|r| r.end_date == return_date)
        .cloned()
        .collect();

    let pickup_day = day_availability(
        &office,
        pickup_date,
        &starting_that_day,
        SlotRole::Pickup,
        DEFAULT_SLOT_INTERVAL_MINUTES,
    );
    let return_day = day_availability(
        &office,
        return_date,
        &ending_that_day,
        SlotRole::Return,
        DEFAULT_SLOT_INTERVAL_MINUTES,
    );

    let problem = if !pickup_day.offers(pickup_time) {
        Some(format!(
            "pickup at {} is not available on {}",
            fmt_hhmm(pickup_time),
            pickup_date
        ))
    } else if !return_day.offers(return_time) {
        Some(format!(
            "return at {} is not available on {}",
            fmt_hhmm(return_time),
            return_date
        ))
    } else {
        None
    };

    let response = CheckResponse {
        valid: problem.is_none() && draft.is_valid(),
        problem,
        pickup_fee: pickup_day.surcharge_for(pickup_time),
        return_fee: return_day.surcharge_for(return_time),
    };
    format.print(&response);
    Ok(())
}
