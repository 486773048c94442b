use chrono::NaiveTime;

use crate::models::{ReservedSlot, SlotAvailability, SlotRole};

/// Flag slots that collide with existing reservations on the queried date.
///
/// Collisions are inclusive on both ends of each reservation's footprint.
/// Reserved slots stay in the output so a picker can render them disabled;
/// hiding them is a UI decision. The caller must have pre-filtered
/// `reserved` to the queried office, date, and role - dates are not
/// re-checked here.
pub fn mark_reserved(
    slots: &[NaiveTime],
    reserved: &[ReservedSlot],
    role: SlotRole,
) -> Vec<SlotAvailability> {
    slots
        .iter()
        .map(|&t| SlotAvailability {
            time: t,
            reserved: reserved.iter().any(|r| r.blocks(t, role)),
        })
        .collect()
}

/// Drop slots that cannot satisfy the same-day minimum gap against the
/// time already chosen on the other side of the booking.
///
/// `role` names the side the list is for: a pickup list is pruned against
/// a chosen return time and vice versa. Only relevant when pickup and
/// return fall on the same calendar date; multi-day bookings are not
/// pruned.
pub fn prune_same_day(
    slots: Vec<NaiveTime>,
    chosen_other: NaiveTime,
    role: SlotRole,
    min_gap_minutes: i64,
) -> Vec<NaiveTime> {
    slots
        .into_iter()
        .filter(|&t| {
            let gap = match role {
                SlotRole::Pickup => chosen_other.signed_duration_since(t),
                SlotRole::Return => t.signed_duration_since(chosen_other),
            };
            gap.num_minutes() >= min_gap_minutes
        })
        .collect()
}
