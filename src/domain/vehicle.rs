//! Vehicle collaborator port

use async_trait::async_trait;

use crate::domain::BookingResult;

/// Operational status of a vehicle as reported by the vehicle service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleStatus {
    Available,
    OnRent,
    Maintenance,
    OutOfService,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::OnRent => "on_rent",
            Self::Maintenance => "maintenance",
            Self::OutOfService => "out_of_service",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "available" => Some(Self::Available),
            "on_rent" => Some(Self::OnRent),
            "maintenance" => Some(Self::Maintenance),
            "out_of_service" => Some(Self::OutOfService),
            _ => None,
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rentability and pricing snapshot of a vehicle.
#[derive(Debug, Clone)]
pub struct VehicleInfo {
    pub vehicle_id: String,
    pub status: VehicleStatus,
    pub daily_rate: f64,
}

/// Vehicle service collaborator: availability/pricing lookups and the
/// best-effort booking-reference mutation used by the downstream propagator.
#[async_trait]
pub trait VehicleDirectory: Send + Sync {
    /// Fetch the vehicle's current status and per-day rate.
    ///
    /// Signals `VehicleNotFound` for unknown/deleted vehicles,
    /// `VehicleUnavailable` when the vehicle is not rentable, and
    /// `UpstreamUnavailable` on transport failure.
    async fn fetch_available(&self, vehicle_id: &str) -> BookingResult<VehicleInfo>;

    /// Record a committed booking on the vehicle so it can be marked on-rent.
    /// Best-effort: callers tolerate failure.
    async fn mark_reserved(&self, vehicle_id: &str, reservation_id: &str) -> BookingResult<()>;
}
