use chrono::NaiveTime;

use crate::models::time;
use crate::models::{ExtensionWindow, OpeningHours, SurchargeRule};

/// A working window widened by an extension. `surcharge` is present only
/// when an active extension produced the widening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtendedWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub surcharge: Option<SurchargeRule>,
}

impl ExtendedWindow {
    pub fn plain(hours: OpeningHours) -> Self {
        Self {
            start: hours.start,
            end: hours.end,
            surcharge: None,
        }
    }
}

/// Widen resolved working hours by the extension configured for one side
/// of the booking.
///
/// Widening saturates at 00:00 and 23:59; there is no cross-midnight
/// rollover. `start == end` encodes a day that is closed except for its
/// extension window: with an active extension the visible window is the
/// widened range around that instant, and without one the day offers no
/// times at all, so `None` is returned rather than a zero-width window.
pub fn apply_extension(
    hours: OpeningHours,
    extension: Option<&ExtensionWindow>,
) -> Option<ExtendedWindow> {
    let extension_only = hours.start == hours.end;
    let Some(ext) = extension.filter(|e| !e.is_zero()) else {
        if extension_only {
            return None;
        }
        return Some(ExtendedWindow::plain(hours));
    };

    Some(ExtendedWindow {
        start: time::sub_minutes_clamped(hours.start, ext.hours_before * 60),
        end: time::add_minutes_clamped(hours.end, ext.hours_after * 60),
        surcharge: Some(SurchargeRule {
            normal: hours,
            flat_price: ext.flat_price,
        }),
    })
}
