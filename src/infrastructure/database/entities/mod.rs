//! SeaORM entities

pub mod reservation;
pub mod vehicle_lock;
