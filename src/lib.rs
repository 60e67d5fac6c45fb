//! # Rental Booking Service
//!
//! The reservation core of a car-rental platform: validates requesters and
//! vehicle availability against their owning services, prices the rental
//! window, and commits reservations under a storage-enforced guarantee that
//! no two live reservations for the same vehicle ever overlap.
//!
//! ## Architecture
//!
//! - **domain**: entities, status machines, pricing and ports
//! - **application**: the reservation orchestrator and downstream propagation
//! - **infrastructure**: SeaORM persistence and collaborator HTTP clients
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: shutdown signal plumbing

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
