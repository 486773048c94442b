use chrono::NaiveTime;

use crate::models::time;

/// Fixed-interval time grid between two bounds, ascending, inclusive of
/// the end when it lands on the grid.
///
/// `start > end` yields an empty grid rather than panicking; upstream
/// stages never produce such a window, but callers passing raw input can.
pub fn generate_slots(start: NaiveTime, end: NaiveTime, interval_minutes: u32) -> Vec<NaiveTime> {
    if interval_minutes == 0 {
        return Vec::new();
    }
    let start_m = time::minutes_of_day(start);
    let end_m = time::minutes_of_day(end);
    if start_m > end_m {
        return Vec::new();
    }

    let mut slots = Vec::with_capacity(((end_m - start_m) / interval_minutes + 1) as usize);
    let mut m = start_m;
    while m <= end_m {
        slots.push(time::from_minutes(m));
        m += interval_minutes;
    }
    slots
}
