//! Reservation orchestrator
//!
//! Sequences a reservation request through identity verification, vehicle
//! availability + pricing, quote computation and the conflict-free commit.
//! Any failure before the commit aborts the whole attempt; nothing partial
//! is persisted. Downstream propagation happens after the commit and never
//! affects the outcome.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use metrics::counter;
use tracing::info;

use crate::application::propagator::VehiclePropagator;
use crate::domain::{
    quote, BookingError, BookingResult, IdentityVerifier, NewReservation, PickupLocation,
    Reservation, ReservationStatus, ReservationStore, VehicleDirectory,
};

/// A validated reservation request, as handed over by the HTTP layer.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub user_id: String,
    pub vehicle_id: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub pickup_location: PickupLocation,
}

/// Service driving the reservation workflow.
pub struct BookingService {
    identity: Arc<dyn IdentityVerifier>,
    vehicles: Arc<dyn VehicleDirectory>,
    store: Arc<dyn ReservationStore>,
    propagator: VehiclePropagator,
}

impl BookingService {
    pub fn new(
        identity: Arc<dyn IdentityVerifier>,
        vehicles: Arc<dyn VehicleDirectory>,
        store: Arc<dyn ReservationStore>,
    ) -> Self {
        let propagator = VehiclePropagator::new(Arc::clone(&vehicles));
        Self {
            identity,
            vehicles,
            store,
            propagator,
        }
    }

    /// Run the full reservation workflow and return the committed record.
    pub async fn create_reservation(&self, req: BookingRequest) -> BookingResult<Reservation> {
        // Input sanity before any outbound call
        if req.user_id.trim().is_empty() {
            return Err(BookingError::InvalidInput("user_id is required".into()));
        }
        if req.vehicle_id.trim().is_empty() {
            return Err(BookingError::InvalidInput("vehicle_id is required".into()));
        }
        if req.end_at <= req.start_at {
            return Err(BookingError::InvalidInput(
                "end_at must be strictly after start_at".into(),
            ));
        }

        // Requester must hold a valid driving credential with the customer role
        let check = self.identity.verify_requester(&req.user_id).await?;
        if !check.is_eligible_customer() {
            counter!("bookings_rejected_total", "stage" => "identity").increment(1);
            return Err(BookingError::RequesterIneligible {
                user_id: req.user_id,
                reason: format!(
                    "identity not valid or not a customer (role: {})",
                    check.role
                ),
            });
        }

        // Vehicle must exist and be rentable; the client yields its day rate
        let vehicle = match self.vehicles.fetch_available(&req.vehicle_id).await {
            Ok(v) => v,
            Err(e) => {
                counter!("bookings_rejected_total", "stage" => "availability").increment(1);
                return Err(e);
            }
        };

        let priced = quote(req.start_at, req.end_at, vehicle.daily_rate)?;

        let reservation = match self
            .store
            .reserve(NewReservation {
                user_id: req.user_id,
                vehicle_id: req.vehicle_id,
                start_at: req.start_at,
                end_at: req.end_at,
                daily_rate: vehicle.daily_rate,
                total_days: priced.total_days,
                total_price: priced.total_price,
                pickup_location: req.pickup_location,
            })
            .await
        {
            Ok(r) => r,
            Err(e @ BookingError::ScheduleConflict { .. }) => {
                // Expected business outcome, not a fault; the caller must
                // pick a different window, retrying as-is cannot succeed.
                counter!("booking_conflicts_total").increment(1);
                info!(error = %e, "Reservation attempt lost the window");
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        counter!("bookings_created_total").increment(1);
        info!(
            reservation_id = %reservation.id,
            vehicle_id = %reservation.vehicle_id,
            total_days = reservation.total_days,
            total_price = reservation.total_price,
            "Reservation committed"
        );

        // Fire-and-forget; a failure here must not disturb the response
        self.propagator
            .notify_reserved(&reservation.vehicle_id, &reservation.id);

        Ok(reservation)
    }

    /// Look up a reservation by ID.
    pub async fn get_reservation(&self, id: &str) -> BookingResult<Option<Reservation>> {
        self.store.find_by_id(id).await
    }

    /// Apply an externally-driven status transition (payment confirmation,
    /// cancellation, completion job).
    pub async fn update_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> BookingResult<Reservation> {
        self.store.set_status(id, status).await
    }
}

// ── Tests ──────────────────────────────────────────────────────
