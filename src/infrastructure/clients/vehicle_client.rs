//! HTTP client for the vehicle service

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::domain::{
    BookingError, BookingResult, VehicleDirectory, VehicleInfo, VehicleStatus,
};

/// Availability/pricing lookups (`GET {base}/api/vehicles/{id}`) and the
/// best-effort booking-reference mutation
/// (`POST {base}/api/vehicles/{id}/mark-booked`).
pub struct HttpVehicleClient {
    client: Client,
    base_url: String,
}

impl HttpVehicleClient {
    pub fn new(base_url: &str, timeout: Duration) -> BookingResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BookingError::Internal(format!("vehicle client init: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct VehicleResponse {
    status: String,
    #[serde(rename = "dailyRate")]
    daily_rate: f64,
    #[serde(rename = "isDeleted", default)]
    is_deleted: bool,
}

fn transport_error(e: reqwest::Error) -> BookingError {
    BookingError::UpstreamUnavailable {
        service: "vehicle-service",
        reason: e.to_string(),
    }
}

/// Map the collaborator payload to a rentability decision.
///
/// A deleted vehicle is indistinguishable from an absent one to callers; a
/// known-but-unrentable vehicle is a business rejection; a payload we cannot
/// interpret is an infrastructure fault, not a rejection.
fn classify(vehicle_id: &str, body: VehicleResponse) -> BookingResult<VehicleInfo> {
    if body.is_deleted {
        return Err(BookingError::VehicleNotFound(vehicle_id.to_string()));
    }

    let status = VehicleStatus::parse(&body.status).ok_or_else(|| {
        BookingError::UpstreamUnavailable {
            service: "vehicle-service",
            reason: format!("unknown vehicle status '{}'", body.status),
        }
    })?;

    if status != VehicleStatus::Available {
        return Err(BookingError::VehicleUnavailable {
            vehicle_id: vehicle_id.to_string(),
            status: status.to_string(),
        });
    }

    if body.daily_rate <= 0.0 {
        return Err(BookingError::UpstreamUnavailable {
            service: "vehicle-service",
            reason: format!("non-positive dailyRate {}", body.daily_rate),
        });
    }

    Ok(VehicleInfo {
        vehicle_id: vehicle_id.to_string(),
        status,
        daily_rate: body.daily_rate,
    })
}

#[async_trait]
impl VehicleDirectory for HttpVehicleClient {
    async fn fetch_available(&self, vehicle_id: &str) -> BookingResult<VehicleInfo> {
        let url = format!("{}/api/vehicles/{}", self.base_url, vehicle_id);
        debug!(url = %url, "Fetching vehicle availability");

        let response = self.client.get(&url).send().await.map_err(transport_error)?;

        match response.status() {
            s if s.is_success() => {
                let body: VehicleResponse = response.json().await.map_err(transport_error)?;
                classify(vehicle_id, body)
            }
            StatusCode::NOT_FOUND => Err(BookingError::VehicleNotFound(vehicle_id.to_string())),
            s => Err(BookingError::UpstreamUnavailable {
                service: "vehicle-service",
                reason: format!("HTTP {s}"),
            }),
        }
    }

    async fn mark_reserved(&self, vehicle_id: &str, reservation_id: &str) -> BookingResult<()> {
        let url = format!("{}/api/vehicles/{}/mark-booked", self.base_url, vehicle_id);
        let payload = json!({
            "booking_id": reservation_id,
            "status": "RESERVED",
        });

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(transport_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(BookingError::UpstreamUnavailable {
                service: "vehicle-service",
                reason: format!("HTTP {}", response.status()),
            })
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
