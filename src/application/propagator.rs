//! Downstream propagation of committed reservations.
//!
//! After a reservation commits, the vehicle service is told to mark the
//! vehicle on-rent. The call runs detached from the request that created the
//! reservation: its result is discarded, failures are logged and tolerated.
//! Until an out-of-band reconciliation catches up, a failed propagation
//! leaves the reservation committed but the vehicle not yet marked — an
//! accepted eventual-consistency window.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::VehicleDirectory;

/// Best-effort notifier for the vehicle service.
pub struct VehiclePropagator {
    vehicles: Arc<dyn VehicleDirectory>,
}

impl VehiclePropagator {
    pub fn new(vehicles: Arc<dyn VehicleDirectory>) -> Self {
        Self { vehicles }
    }

    /// Spawn a detached task recording `reservation_id` on the vehicle.
    /// Returns immediately; the caller's response never waits on this.
    pub fn notify_reserved(&self, vehicle_id: &str, reservation_id: &str) {
        let vehicles = Arc::clone(&self.vehicles);
        let vehicle_id = vehicle_id.to_owned();
        let reservation_id = reservation_id.to_owned();

        tokio::spawn(async move {
            match vehicles.mark_reserved(&vehicle_id, &reservation_id).await {
                Ok(()) => {
                    debug!(
                        vehicle_id = %vehicle_id,
                        reservation_id = %reservation_id,
                        "Vehicle marked as reserved"
                    );
                }
                Err(e) => {
                    warn!(
                        vehicle_id = %vehicle_id,
                        reservation_id = %reservation_id,
                        error = %e,
                        "Failed to propagate reservation to vehicle service; \
                         reservation stands, reconciliation will catch up"
                    );
                }
            }
        });
    }
}
