//! Reservation DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Reservation;

/// Request to create a new reservation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    /// Requester ID (validated against the user service)
    #[validate(length(min = 1, max = 64))]
    pub user_id: String,
    /// Vehicle to reserve
    #[validate(length(min = 1, max = 64))]
    pub vehicle_id: String,
    /// Rental window start (RFC 3339)
    pub start_at: String,
    /// Rental window end, exclusive (RFC 3339)
    pub end_at: String,
    /// Pickup location code: HANOI, HOCHIMINH or DANANG
    #[validate(length(min = 1))]
    pub pickup_location: String,
}

/// Request to transition a reservation's status (system/admin driven)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusRequest {
    /// Target status: CONFIRMED, CANCELLED, COMPLETED or REJECTED
    #[validate(length(min = 1))]
    pub status: String,
}

/// Reservation details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationDto {
    pub id: String,
    pub user_id: String,
    pub vehicle_id: String,
    pub start_at: String,
    pub end_at: String,
    pub daily_rate: f64,
    pub total_days: i32,
    pub total_price: f64,
    pub pickup_location: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            vehicle_id: r.vehicle_id,
            start_at: r.start_at.to_rfc3339(),
            end_at: r.end_at.to_rfc3339(),
            daily_rate: r.daily_rate,
            total_days: r.total_days,
            total_price: r.total_price,
            pickup_location: r.pickup_location.to_string(),
            status: r.status.to_string(),
            created_at: r.created_at.to_rfc3339(),
            updated_at: r.updated_at.to_rfc3339(),
        }
    }
}
