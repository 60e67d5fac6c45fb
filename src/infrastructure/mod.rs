//! Infrastructure layer - external concerns

pub mod clients;
pub mod database;

pub use clients::{HttpIdentityClient, HttpVehicleClient};
pub use database::repositories::SeaOrmReservationStore;
pub use database::{init_database, DatabaseConfig};
