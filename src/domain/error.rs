use thiserror::Error;

/// Closed error set for the booking workflow.
///
/// Every fallible operation in the crate returns one of these kinds; the HTTP
/// layer maps each variant to exactly one status class.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Requester {user_id} is not eligible: {reason}")]
    RequesterIneligible { user_id: String, reason: String },

    #[error("Vehicle {0} not found")]
    VehicleNotFound(String),

    #[error("Vehicle {vehicle_id} is not available (status: {status})")]
    VehicleUnavailable { vehicle_id: String, status: String },

    #[error("{service} unavailable: {reason}")]
    UpstreamUnavailable { service: &'static str, reason: String },

    #[error("Vehicle {vehicle_id} is already reserved for an overlapping period")]
    ScheduleConflict { vehicle_id: String },

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Illegal status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type BookingResult<T> = Result<T, BookingError>;
