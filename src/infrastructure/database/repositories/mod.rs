//! SeaORM-backed store implementations

pub mod reservation_repository;

pub use reservation_repository::SeaOrmReservationStore;
