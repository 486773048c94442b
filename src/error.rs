use thiserror::Error;

/// Recoverable validation failures raised by the booking draft reducer.
/// None of these are fatal: the draft stays usable and the UI surfaces
/// the message next to the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("same-day rentals must run for at least {min_hours} hours")]
    SameDayTooShort { min_hours: i64 },

    #[error("return date cannot be before pickup date")]
    InvalidDateRange,

    #[error("driver age {age} is outside the accepted range {min_age}-{max_age}")]
    DriverAgeOutOfRange { age: u8, min_age: u8, max_age: u8 },

    #[error("select {missing} first")]
    MissingStep { missing: &'static str },
}

/// Failures at the async collaborator seam.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("office {0} not found")]
    OfficeNotFound(String),

    /// A newer query started before this one resolved; the stale result
    /// must be discarded, never merged into the current slot list.
    #[error("availability query superseded by a newer one")]
    Superseded,

    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}
