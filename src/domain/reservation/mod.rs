//! Reservation aggregate: entity, status machine and store port

pub mod model;
pub mod store;

pub use model::{PickupLocation, Reservation, ReservationStatus};
pub use store::{NewReservation, ReservationStore};
