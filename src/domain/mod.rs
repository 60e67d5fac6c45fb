//! Domain layer: entities, status machines, pricing and the ports the
//! application layer depends on.

pub mod error;
pub mod identity;
pub mod quote;
pub mod reservation;
pub mod vehicle;

pub use error::{BookingError, BookingResult};
pub use identity::{IdentityCheck, IdentityVerifier};
pub use quote::{quote, Quote};
pub use reservation::{
    NewReservation, PickupLocation, Reservation, ReservationStatus, ReservationStore,
};
pub use vehicle::{VehicleDirectory, VehicleInfo, VehicleStatus};
