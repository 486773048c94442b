use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::time;
use crate::models::{ExtensionWindow, Office, OpeningHours, SlotRole, Weekday, WindowSource};

/// Effective schedule for one office and calendar date. `hours` is `None`
/// exactly when the office is closed; extensions are only carried when the
/// weekly schedule supplied the window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedWindow {
    pub source: WindowSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<OpeningHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_extension: Option<ExtensionWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_extension: Option<ExtensionWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl ResolvedWindow {
    fn closed(info: Option<String>) -> Self {
        Self {
            source: WindowSource::Closed,
            hours: None,
            pickup_extension: None,
            return_extension: None,
            info,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.hours.is_none()
    }

    pub fn extension_for(&self, role: SlotRole) -> Option<&ExtensionWindow> {
        match role {
            SlotRole::Pickup => self.pickup_extension.as_ref(),
            SlotRole::Return => self.return_extension.as_ref(),
        }
    }
}

/// Resolve the effective open/close window for an office on a date.
///
/// A special day matching the date's month and day fully overrides the
/// weekly schedule, including its open/closed state; there is no merging
/// of the two. An open entry with missing times falls back to the widest
/// window, 00:00 - 23:59.
pub fn resolve_window(office: &Office, date: NaiveDate) -> ResolvedWindow {
    if let Some(special) = office.special_day(date) {
        if !special.is_open {
            let info = special
                .reason
                .clone()
                .unwrap_or_else(|| "Closed".to_string());
            return ResolvedWindow::closed(Some(info));
        }
        let hours = OpeningHours::new(
            special.start_time.unwrap_or_else(time::day_start),
            special.end_time.unwrap_or_else(time::day_end),
        );
        let info = match &special.reason {
            Some(reason) => format!("{} ({})", hours, reason),
            None => hours.to_string(),
        };
        return ResolvedWindow {
            source: WindowSource::Special,
            hours: Some(hours),
            pickup_extension: None,
            return_extension: None,
            info: Some(info),
        };
    }

    let weekday = Weekday::from(date.weekday());
    let Some(working) = office.working_day(weekday) else {
        tracing::warn!("office {} has no schedule entry for {}", office.id, weekday);
        return ResolvedWindow::closed(Some("Closed".to_string()));
    };
    if !working.is_open {
        return ResolvedWindow::closed(Some("Closed".to_string()));
    }

    if working.start_time.is_none() || working.end_time.is_none() {
        tracing::warn!(
            "office {} is open on {} with incomplete hours, using 00:00 - 23:59",
            office.id,
            weekday
        );
    }
    let hours = OpeningHours::new(
        working.start_time.unwrap_or_else(time::day_start),
        working.end_time.unwrap_or_else(time::day_end),
    );
    ResolvedWindow {
        source: WindowSource::Working,
        hours: Some(hours),
        pickup_extension: working.pickup_extension,
        return_extension: working.return_extension,
        info: Some(hours.to_string()),
    }
}
