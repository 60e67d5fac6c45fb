//! HTTP clients for the collaborator services

pub mod identity_client;
pub mod vehicle_client;

pub use identity_client::HttpIdentityClient;
pub use vehicle_client::HttpVehicleClient;
