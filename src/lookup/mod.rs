use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::engine;
use crate::error::LookupError;
use crate::models::{DayAvailability, Office, OfficeId, ReservedSlot, SlotRole};

/// Source of office schedule documents. The engine assumes documents are
/// complete when handed over; it never fetches lazily per field.
#[async_trait]
pub trait ScheduleDirectory: Send + Sync {
    async fn office(&self, id: &OfficeId) -> Result<Option<Office>>;
}

/// Source of existing reservations touching one office and date. Pickup
/// queries return reservations starting on the date, return queries those
/// ending on it.
#[async_trait]
pub trait ReservationLookup: Send + Sync {
    async fn reserved_slots(
        &self,
        office: &OfficeId,
        date: NaiveDate,
        role: SlotRole,
    ) -> Result<Vec<ReservedSlot>>;
}

/// In-memory office directory, used by tests and the CLI.
#[derive(Debug, Default)]
pub struct StaticDirectory {
    offices: HashMap<OfficeId, Office>,
}

impl StaticDirectory {
    pub fn new(offices: impl IntoIterator<Item = Office>) -> Self {
        Self {
            offices: offices.into_iter().map(|o| (o.id.clone(), o)).collect(),
        }
    }
}

#[async_trait]
impl ScheduleDirectory for StaticDirectory {
    async fn office(&self, id: &OfficeId) -> Result<Option<Office>> {
        Ok(self.offices.get(id).cloned())
    }
}

/// In-memory reservation source filtering a fixed list by date and role.
#[derive(Debug, Default)]
pub struct StaticReservations {
    slots: Vec<ReservedSlot>,
}

impl StaticReservations {
    pub fn new(slots: Vec<ReservedSlot>) -> Self {
        Self { slots }
    }
}

#[async_trait]
impl ReservationLookup for StaticReservations {
    async fn reserved_slots(
        &self,
        _office: &OfficeId,
        date: NaiveDate,
        role: SlotRole,
    ) -> Result<Vec<ReservedSlot>> {
        let matches = self
            .slots
            .iter()
            .filter(|r| match role {
                SlotRole::Pickup => r.start_date == date,
                SlotRole::Return => r.end_date == date,
            })
            .cloned()
            .collect();
        Ok(matches)
    }
}

/// Runs the availability pipeline through the collaborator seams with a
/// "latest request wins" guard: every query takes a sequence ticket, and
/// a result whose ticket has been overtaken while its lookups were in
/// flight is discarded as [`LookupError::Superseded`]. Callers drop that
/// error on the floor; the newer query's result is the only one applied.
pub struct AvailabilityService<D, R> {
    directory: D,
    reservations: R,
    seq: AtomicU64,
}

impl<D: ScheduleDirectory, R: ReservationLookup> AvailabilityService<D, R> {
    pub fn new(directory: D, reservations: R) -> Self {
        Self {
            directory,
            reservations,
            seq: AtomicU64::new(0),
        }
    }

    pub async fn day_availability(
        &self,
        office_id: &OfficeId,
        date: NaiveDate,
        role: SlotRole,
        interval_minutes: u32,
    ) -> Result<DayAvailability, LookupError> {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        let office = self
            .directory
            .office(office_id)
            .await?
            .ok_or_else(|| LookupError::OfficeNotFound(office_id.to_string()))?;
        let reserved = self
            .reservations
            .reserved_slots(office_id, date, role)
            .await?;

        if self.seq.load(Ordering::SeqCst) != ticket {
            tracing::debug!("discarding superseded availability lookup for {}", date);
            return Err(LookupError::Superseded);
        }

        Ok(engine::day_availability(
            &office,
            date,
            &reserved,
            role,
            interval_minutes,
        ))
    }
}
