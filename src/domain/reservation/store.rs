//! Reservation store interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{PickupLocation, Reservation, ReservationStatus};
use crate::domain::BookingResult;

/// Fields of a reservation about to be committed.
///
/// Pricing fields are computed by the quote calculator before the store is
/// reached; the store never derives them.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub user_id: String,
    pub vehicle_id: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub daily_rate: f64,
    pub total_days: i32,
    pub total_price: f64,
    pub pickup_location: PickupLocation,
}

/// The only component permitted to persist reservations, and the sole
/// enforcer of the overlap invariant: no two PENDING/CONFIRMED reservations
/// for the same vehicle may overlap in time, even under concurrent `reserve`
/// calls from multiple service replicas.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Atomically check for schedule conflicts and persist a new PENDING
    /// reservation. Returns `ScheduleConflict` when a blocking reservation
    /// overlaps the requested window. A retry carrying the exact same intent
    /// (requester, vehicle, window) returns the already-committed record.
    async fn reserve(&self, new: NewReservation) -> BookingResult<Reservation>;

    /// Find a reservation by ID.
    async fn find_by_id(&self, id: &str) -> BookingResult<Option<Reservation>>;

    /// Apply a status transition, enforcing the legal-transition table.
    /// Illegal transitions fail with `InvalidTransition`; unknown IDs with
    /// `NotFound`. Refreshes `updated_at`.
    async fn set_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> BookingResult<Reservation>;

    /// All calendar-blocking (PENDING/CONFIRMED) reservations of a vehicle.
    async fn find_blocking(&self, vehicle_id: &str) -> BookingResult<Vec<Reservation>>;
}
