//! Shared HTTP plumbing: response envelope, error mapping, validated JSON

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::domain::BookingError;

/// Standard response wrapper.
///
/// Every REST endpoint returns data in this envelope.
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` if the request succeeded
    pub success: bool,
    /// Payload; `null` on failure
    pub data: Option<T>,
    /// Error description; `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Empty response for operations without return data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

/// Wrapper turning a `BookingError` into the HTTP status its kind maps to.
///
/// Handlers return `Result<_, ApiError>` and propagate domain errors with `?`.
#[derive(Debug)]
pub struct ApiError(pub BookingError);

impl From<BookingError> for ApiError {
    fn from(e: BookingError) -> Self {
        Self(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            BookingError::InvalidInput(_)
            | BookingError::InvalidTransition { .. }
            | BookingError::VehicleUnavailable { .. } => StatusCode::BAD_REQUEST,
            BookingError::RequesterIneligible { .. } => StatusCode::FORBIDDEN,
            BookingError::VehicleNotFound(_) | BookingError::NotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            BookingError::ScheduleConflict { .. } => StatusCode::CONFLICT,
            BookingError::UpstreamUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            BookingError::Database(_) | BookingError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self.0 {
            // Never leak internals through the API surface
            BookingError::Database(_) | BookingError::Internal(_) => {
                error!(error = %self.0, "Unexpected failure handling request");
                "Internal server error".to_string()
            }
            // Expected business outcome; the orchestrator already logged it
            BookingError::ScheduleConflict { .. } => self.0.to_string(),
            e => {
                debug!(error = %e, "Request rejected");
                e.to_string()
            }
        };

        (status, Json(ApiResponse::<EmptyData>::error(message))).into_response()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_error_kind_maps_to_its_status_class() {
        let cases = [
            (
                BookingError::InvalidInput("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                BookingError::RequesterIneligible {
                    user_id: "U1".into(),
                    reason: "nope".into(),
                },
                StatusCode::FORBIDDEN,
            ),
            (
                BookingError::VehicleNotFound("V1".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                BookingError::VehicleUnavailable {
                    vehicle_id: "V1".into(),
                    status: "maintenance".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                BookingError::UpstreamUnavailable {
                    service: "user-service",
                    reason: "timeout".into(),
                },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                BookingError::ScheduleConflict {
                    vehicle_id: "V1".into(),
                },
                StatusCode::CONFLICT,
            ),
            (
                BookingError::InvalidTransition {
                    from: "PENDING".into(),
                    to: "COMPLETED".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                BookingError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError(err).status(), expected);
        }
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let resp = ApiError(BookingError::Internal("secret table missing".into())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
