mod conflict;
mod extension;
mod schedule;
mod slots;

pub use conflict::*;
pub use extension::*;
pub use schedule::*;
pub use slots::*;

use chrono::NaiveDate;

use crate::models::{DayAvailability, Office, ReservedSlot, SlotRole, WindowSource};

/// Compute the selectable-slot picture for one office, date, and booking
/// side: resolve the day's window, widen it by the side's extension, lay
/// down the slot grid, and flag collisions with existing reservations.
///
/// `reserved` must already be scoped to the office, date, and role (the
/// reservation lookup collaborator's contract). A closed day, or an
/// extension-only day with no active extension, comes back with an empty
/// slot list - a displayable outcome, not an error.
pub fn day_availability(
    office: &Office,
    date: NaiveDate,
    reserved: &[ReservedSlot],
    role: SlotRole,
    interval_minutes: u32,
) -> DayAvailability {
    let window = resolve_window(office, date);
    let Some(hours) = window.hours else {
        return DayAvailability::closed(window.info);
    };

    // Extensions only attach to the weekly schedule; a special day's hours
    // are taken as-is.
    let extended = match window.source {
        WindowSource::Working => apply_extension(hours, window.extension_for(role)),
        _ => Some(ExtendedWindow::plain(hours)),
    };
    let Some(extended) = extended else {
        return DayAvailability {
            source: window.source,
            info: window.info,
            slots: Vec::new(),
            surcharge: None,
        };
    };

    let grid = generate_slots(extended.start, extended.end, interval_minutes);
    DayAvailability {
        source: window.source,
        info: window.info,
        slots: mark_reserved(&grid, reserved, role),
        surcharge: extended.surcharge,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time::{fmt_hhmm, parse_hhmm};
    use crate::models::{ExtensionWindow, SpecialDay, Weekday, WorkingDay};
    use crate::DEFAULT_SLOT_INTERVAL_MINUTES;
    use chrono::NaiveTime;

    fn t(s: &str) -> NaiveTime {
        parse_hhmm(s).unwrap()
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 10).unwrap()
    }

    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 9).unwrap()
    }

    fn office() -> Office {
        let mut office = Office::new("Scenario Office");
        office
            .working_days
            .push(WorkingDay::open(Weekday::Monday, t("09:00"), t("17:00")));
        office.working_days.push(WorkingDay::closed(Weekday::Sunday));
        office
    }

    #[test]
    fn test_plain_open_monday_yields_33_free_slots() {
        let avail = day_availability(
            &office(),
            monday(),
            &[],
            SlotRole::Pickup,
            DEFAULT_SLOT_INTERVAL_MINUTES,
        );
        assert_eq!(avail.source, WindowSource::Working);
        assert_eq!(avail.slots.len(), 33);
        assert!(avail.slots.iter().all(|s| !s.reserved));
        assert!(avail.surcharge.is_none());
        assert_eq!(avail.surcharge_for(t("09:00")), 0.0);
    }

    #[test]
    fn test_closed_sunday_yields_empty_list() {
        let avail = day_availability(
            &office(),
            sunday(),
            &[],
            SlotRole::Pickup,
            DEFAULT_SLOT_INTERVAL_MINUTES,
        );
        assert_eq!(avail.source, WindowSource::Closed);
        assert!(!avail.has_slots());
    }

    #[test]
    fn test_special_closure_beats_any_weekly_config() {
        let mut office = office();
        office.special_days.push(SpecialDay {
            month: 8,
            day: 10,
            is_open: false,
            start_time: None,
            end_time: None,
            reason: None,
        });
        let avail = day_availability(
            &office,
            monday(),
            &[],
            SlotRole::Pickup,
            DEFAULT_SLOT_INTERVAL_MINUTES,
        );
        assert_eq!(avail.source, WindowSource::Closed);
        assert!(avail.slots.is_empty());
    }

    #[test]
    fn test_longer_extension_never_starts_later() {
        let earliest_with = |hours_before: u32| {
            let mut office = office();
            office.working_days[0].pickup_extension =
                Some(ExtensionWindow::new(hours_before, 0, 10.0));
            day_availability(
                &office,
                monday(),
                &[],
                SlotRole::Pickup,
                DEFAULT_SLOT_INTERVAL_MINUTES,
            )
            .first_available()
            .unwrap()
        };
        let mut previous = earliest_with(1);
        for hours_before in 2..=10 {
            let earliest = earliest_with(hours_before);
            assert!(earliest <= previous, "regressed at {}h", hours_before);
            previous = earliest;
        }
    }

    #[test]
    fn test_extension_only_day_end_to_end() {
        let mut office = Office::new("Extension Only");
        office.working_days.push(
            WorkingDay::open(Weekday::Monday, t("09:00"), t("09:00"))
                .with_pickup_extension(ExtensionWindow::new(1, 1, 5.0)),
        );
        let avail = day_availability(
            &office,
            monday(),
            &[],
            SlotRole::Pickup,
            DEFAULT_SLOT_INTERVAL_MINUTES,
        );
        let times: Vec<String> = avail.slots.iter().map(|s| fmt_hhmm(s.time)).collect();
        assert_eq!(times.first().map(String::as_str), Some("08:00"));
        assert_eq!(times.last().map(String::as_str), Some("10:00"));
        assert_eq!(times.len(), 9);
        // flat fee outside the single normal instant, free exactly on it
        assert_eq!(avail.surcharge_for(t("08:00")), 5.0);
        assert_eq!(avail.surcharge_for(t("10:00")), 5.0);
        assert_eq!(avail.surcharge_for(t("09:00")), 0.0);
    }

    #[test]
    fn test_extension_only_day_without_extension_is_empty_but_working() {
        let mut office = Office::new("Degenerate");
        office
            .working_days
            .push(WorkingDay::open(Weekday::Monday, t("09:00"), t("09:00")));
        let avail = day_availability(
            &office,
            monday(),
            &[],
            SlotRole::Pickup,
            DEFAULT_SLOT_INTERVAL_MINUTES,
        );
        assert_eq!(avail.source, WindowSource::Working);
        assert!(avail.slots.is_empty());
        assert!(avail.surcharge.is_none());
    }

    #[test]
    fn test_return_role_uses_return_extension() {
        let mut office = office();
        office.working_days[0].pickup_extension = Some(ExtensionWindow::new(2, 0, 10.0));
        office.working_days[0].return_extension = Some(ExtensionWindow::new(0, 2, 15.0));
        let pickup = day_availability(&office, monday(), &[], SlotRole::Pickup, 15);
        let ret = day_availability(&office, monday(), &[], SlotRole::Return, 15);
        assert_eq!(pickup.first_available(), Some(t("07:00")));
        assert_eq!(ret.first_available(), Some(t("09:00")));
        assert_eq!(ret.slots.last().unwrap().time, t("19:00"));
        assert_eq!(ret.surcharge_for(t("19:00")), 15.0);
    }

    #[test]
    fn test_reservations_flag_but_do_not_remove() {
        let reserved = vec![ReservedSlot::new(
            monday(),
            t("10:00"),
            monday(),
            t("12:00"),
        )];
        let avail = day_availability(&office(), monday(), &reserved, SlotRole::Pickup, 15);
        assert_eq!(avail.slots.len(), 33);
        let reserved_count = avail.slots.iter().filter(|s| s.reserved).count();
        // 10:00 through 12:00 inclusive on a 15-minute grid
        assert_eq!(reserved_count, 9);
        assert_eq!(avail.first_available(), Some(t("09:00")));
        assert!(!avail.offers(t("11:00")));
    }
}
