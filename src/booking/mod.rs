use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::BookingError;
use crate::models::OfficeId;
use crate::SAME_DAY_MIN_HOURS;

/// Inclusive driver-age bounds for a deployment. The default is 21-80;
/// stricter fleets construct their own policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgePolicy {
    pub min_age: u8,
    pub max_age: u8,
}

impl Default for AgePolicy {
    fn default() -> Self {
        Self {
            min_age: 21,
            max_age: 80,
        }
    }
}

impl AgePolicy {
    pub fn new(min_age: u8, max_age: u8) -> Self {
        Self { min_age, max_age }
    }

    pub fn allows(&self, age: u8) -> bool {
        (self.min_age..=self.max_age).contains(&age)
    }
}

/// Whether a same-day pickup/return pair satisfies the minimum rental
/// length. Exactly the minimum is accepted.
pub fn same_day_gap_ok(pickup: NaiveTime, ret: NaiveTime) -> bool {
    ret.signed_duration_since(pickup).num_minutes() >= SAME_DAY_MIN_HOURS * 60
}

/// User actions a booking UI dispatches at the draft.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingEvent {
    SelectOffice(OfficeId),
    SelectDates {
        pickup_date: NaiveDate,
        return_date: NaiveDate,
    },
    SelectPickupTime(NaiveTime),
    SelectReturnTime(NaiveTime),
    SetDriverAge(u8),
    Reset,
}

/// The prospective booking as an explicit state machine. Each state
/// carries exactly the selections made so far, so a stale downstream
/// choice cannot survive an upstream change.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BookingDraft {
    #[default]
    NoOffice,
    OfficeSelected {
        office: OfficeId,
    },
    DateRangeChosen {
        office: OfficeId,
        pickup_date: NaiveDate,
        return_date: NaiveDate,
    },
    PickupTimeChosen {
        office: OfficeId,
        pickup_date: NaiveDate,
        return_date: NaiveDate,
        pickup_time: NaiveTime,
    },
    ReturnTimeChosen {
        office: OfficeId,
        pickup_date: NaiveDate,
        return_date: NaiveDate,
        pickup_time: NaiveTime,
        return_time: NaiveTime,
    },
    Valid {
        office: OfficeId,
        pickup_date: NaiveDate,
        return_date: NaiveDate,
        pickup_time: NaiveTime,
        return_time: NaiveTime,
        driver_age: u8,
    },
}

impl BookingDraft {
    pub fn new() -> Self {
        Self::NoOffice
    }

    /// Pure reducer: consume an event, return the next state plus any
    /// validation error. Errors are recoverable; a violating choice is
    /// rejected or the conflicting downstream selection is cleared, never
    /// silently accepted.
    pub fn apply(self, event: BookingEvent, policy: &AgePolicy) -> (Self, Option<BookingError>) {
        use BookingDraft::*;

        match event {
            BookingEvent::Reset => (NoOffice, None),

            // Changing office invalidates every downstream selection.
            BookingEvent::SelectOffice(office) => (OfficeSelected { office }, None),

            BookingEvent::SelectDates {
                pickup_date,
                return_date,
            } => {
                let Some(office) = self.office().cloned() else {
                    return (self, Some(BookingError::MissingStep { missing: "an office" }));
                };
                if return_date < pickup_date {
                    return (self, Some(BookingError::InvalidDateRange));
                }
                // New dates drop any chosen times: they were computed for
                // the old dates.
                (
                    DateRangeChosen {
                        office,
                        pickup_date,
                        return_date,
                    },
                    None,
                )
            }

            BookingEvent::SelectPickupTime(pickup_time) => match self {
                NoOffice | OfficeSelected { .. } => (
                    self,
                    Some(BookingError::MissingStep {
                        missing: "pickup and return dates",
                    }),
                ),
                DateRangeChosen {
                    office,
                    pickup_date,
                    return_date,
                }
                | PickupTimeChosen {
                    office,
                    pickup_date,
                    return_date,
                    ..
                } => (
                    PickupTimeChosen {
                        office,
                        pickup_date,
                        return_date,
                        pickup_time,
                    },
                    None,
                ),
                ReturnTimeChosen {
                    office,
                    pickup_date,
                    return_date,
                    return_time,
                    ..
                } => reconcile_times(
                    office,
                    pickup_date,
                    return_date,
                    pickup_time,
                    return_time,
                    None,
                ),
                Valid {
                    office,
                    pickup_date,
                    return_date,
                    return_time,
                    driver_age,
                    ..
                } => reconcile_times(
                    office,
                    pickup_date,
                    return_date,
                    pickup_time,
                    return_time,
                    Some(driver_age),
                ),
            },

            BookingEvent::SelectReturnTime(return_time) => match self {
                NoOffice | OfficeSelected { .. } | DateRangeChosen { .. } => (
                    self,
                    Some(BookingError::MissingStep {
                        missing: "a pickup time",
                    }),
                ),
                PickupTimeChosen {
                    office,
                    pickup_date,
                    return_date,
                    pickup_time,
                }
                | ReturnTimeChosen {
                    office,
                    pickup_date,
                    return_date,
                    pickup_time,
                    ..
                } => reconcile_times(
                    office,
                    pickup_date,
                    return_date,
                    pickup_time,
                    return_time,
                    None,
                ),
                Valid {
                    office,
                    pickup_date,
                    return_date,
                    pickup_time,
                    driver_age,
                    ..
                } => reconcile_times(
                    office,
                    pickup_date,
                    return_date,
                    pickup_time,
                    return_time,
                    Some(driver_age),
                ),
            },

            BookingEvent::SetDriverAge(age) => match self {
                ReturnTimeChosen {
                    office,
                    pickup_date,
                    return_date,
                    pickup_time,
                    return_time,
                }
                | Valid {
                    office,
                    pickup_date,
                    return_date,
                    pickup_time,
                    return_time,
                    ..
                } => {
                    if policy.allows(age) {
                        (
                            Valid {
                                office,
                                pickup_date,
                                return_date,
                                pickup_time,
                                return_time,
                                driver_age: age,
                            },
                            None,
                        )
                    } else {
                        (
                            ReturnTimeChosen {
                                office,
                                pickup_date,
                                return_date,
                                pickup_time,
                                return_time,
                            },
                            Some(BookingError::DriverAgeOutOfRange {
                                age,
                                min_age: policy.min_age,
                                max_age: policy.max_age,
                            }),
                        )
                    }
                }
                _ => (
                    self,
                    Some(BookingError::MissingStep {
                        missing: "pickup and return times",
                    }),
                ),
            },
        }
    }

    pub fn office(&self) -> Option<&OfficeId> {
        use BookingDraft::*;
        match self {
            NoOffice => None,
            OfficeSelected { office }
            | DateRangeChosen { office, .. }
            | PickupTimeChosen { office, .. }
            | ReturnTimeChosen { office, .. }
            | Valid { office, .. } => Some(office),
        }
    }

    pub fn dates(&self) -> Option<(NaiveDate, NaiveDate)> {
        use BookingDraft::*;
        match self {
            NoOffice | OfficeSelected { .. } => None,
            DateRangeChosen {
                pickup_date,
                return_date,
                ..
            }
            | PickupTimeChosen {
                pickup_date,
                return_date,
                ..
            }
            | ReturnTimeChosen {
                pickup_date,
                return_date,
                ..
            }
            | Valid {
                pickup_date,
                return_date,
                ..
            } => Some((*pickup_date, *return_date)),
        }
    }

    pub fn pickup_time(&self) -> Option<NaiveTime> {
        use BookingDraft::*;
        match self {
            PickupTimeChosen { pickup_time, .. }
            | ReturnTimeChosen { pickup_time, .. }
            | Valid { pickup_time, .. } => Some(*pickup_time),
            _ => None,
        }
    }

    pub fn return_time(&self) -> Option<NaiveTime> {
        use BookingDraft::*;
        match self {
            ReturnTimeChosen { return_time, .. } | Valid { return_time, .. } => Some(*return_time),
            _ => None,
        }
    }

    pub fn is_same_day(&self) -> bool {
        self.dates().map(|(p, r)| p == r).unwrap_or(false)
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, BookingDraft::Valid { .. })
    }
}

/// Reconcile a freshly chosen time against the other side. On a same-day
/// violation the return selection is the one that goes: the draft falls
/// back to pickup-time-chosen and the error names the rule.
fn reconcile_times(
    office: OfficeId,
    pickup_date: NaiveDate,
    return_date: NaiveDate,
    pickup_time: NaiveTime,
    return_time: NaiveTime,
    driver_age: Option<u8>,
) -> (BookingDraft, Option<BookingError>) {
    if pickup_date == return_date && !same_day_gap_ok(pickup_time, return_time) {
        return (
            BookingDraft::PickupTimeChosen {
                office,
                pickup_date,
                return_date,
                pickup_time,
            },
            Some(BookingError::SameDayTooShort {
                min_hours: SAME_DAY_MIN_HOURS,
            }),
        );
    }
    let draft = match driver_age {
        Some(driver_age) => BookingDraft::Valid {
            office,
            pickup_date,
            return_date,
            pickup_time,
            return_time,
            driver_age,
        },
        None => BookingDraft::ReturnTimeChosen {
            office,
            pickup_date,
            return_date,
            pickup_time,
            return_time,
        },
    };
    (draft, None)
}
