//! Reservation HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::application::{BookingRequest, BookingService};
use crate::domain::{BookingError, PickupLocation, ReservationStatus};
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedJson};

use super::dto::*;

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationAppState {
    pub service: Arc<BookingService>,
}

fn parse_instant(field: &str, value: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| BookingError::InvalidInput(format!("{field}: {e}")).into())
}

fn parse_location(value: &str) -> Result<PickupLocation, ApiError> {
    PickupLocation::parse(value).ok_or_else(|| {
        BookingError::InvalidInput(format!(
            "pickup_location must be one of HANOI, HOCHIMINH, DANANG (got '{value}')"
        ))
        .into()
    })
}

fn parse_reservation_id(value: &str) -> Result<(), ApiError> {
    Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| BookingError::InvalidInput(format!("malformed reservation id '{value}'")).into())
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation committed", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Invalid payload, window or pickup location"),
        (status = 403, description = "Requester ineligible"),
        (status = 404, description = "Vehicle not found"),
        (status = 409, description = "Vehicle already reserved for an overlapping window"),
        (status = 503, description = "A collaborator service is unavailable")
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationAppState>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReservationDto>>), ApiError> {
    let start_at = parse_instant("start_at", &request.start_at)?;
    let end_at = parse_instant("end_at", &request.end_at)?;
    let pickup_location = parse_location(&request.pickup_location)?;

    let reservation = state
        .service
        .create_reservation(BookingRequest {
            user_id: request.user_id,
            vehicle_id: request.vehicle_id,
            start_at,
            end_at,
            pickup_location,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(reservation.into())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    params(("id" = String, Path, description = "Reservation ID (UUID)")),
    responses(
        (status = 200, description = "Reservation details", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Malformed reservation ID"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_reservation(
    State(state): State<ReservationAppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReservationDto>>, ApiError> {
    parse_reservation_id(&id)?;

    let reservation = state.service.get_reservation(&id).await?;

    let Some(reservation) = reservation else {
        return Err(BookingError::NotFound {
            entity: "Reservation",
            field: "id",
            value: id,
        }
        .into());
    };

    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/status",
    tag = "Reservations",
    params(("id" = String, Path, description = "Reservation ID (UUID)")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Malformed ID, unknown status or illegal transition"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_reservation_status(
    State(state): State<ReservationAppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<ReservationDto>>, ApiError> {
    parse_reservation_id(&id)?;

    let status = ReservationStatus::parse(&request.status).ok_or_else(|| {
        ApiError::from(BookingError::InvalidInput(format!(
            "unknown status '{}'",
            request.status
        )))
    })?;

    let reservation = state.service.update_status(&id, status).await?;

    Ok(Json(ApiResponse::success(reservation.into())))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::Router;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    use crate::domain::{
        BookingResult, IdentityCheck, IdentityVerifier, VehicleDirectory, VehicleInfo,
        VehicleStatus,
    };
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::SeaOrmReservationStore;
    use crate::interfaces::http::create_api_router;

    struct StubVerifier {
        is_valid: bool,
    }

    #[async_trait]
    impl IdentityVerifier for StubVerifier {
        async fn verify_requester(&self, _user_id: &str) -> BookingResult<IdentityCheck> {
            Ok(IdentityCheck {
                is_valid: self.is_valid,
                role: "customer".into(),
            })
        }
    }

    struct StubDirectory;

    #[async_trait]
    impl VehicleDirectory for StubDirectory {
        async fn fetch_available(&self, vehicle_id: &str) -> BookingResult<VehicleInfo> {
            Ok(VehicleInfo {
                vehicle_id: vehicle_id.to_owned(),
                status: VehicleStatus::Available,
                daily_rate: 500.0,
            })
        }

        async fn mark_reserved(
            &self,
            _vehicle_id: &str,
            _reservation_id: &str,
        ) -> BookingResult<()> {
            Ok(())
        }
    }

    struct Harness {
        _dir: TempDir,
        app: Router,
        store: Arc<SeaOrmReservationStore>,
    }

    async fn harness(requester_valid: bool) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}/api.db?mode=rwc", dir.path().display());
        let db = Database::connect(&url).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let store = Arc::new(SeaOrmReservationStore::new(db));
        let service = Arc::new(BookingService::new(
            Arc::new(StubVerifier {
                is_valid: requester_valid,
            }),
            Arc::new(StubDirectory),
            store.clone(),
        ));
        let prometheus = PrometheusBuilder::new().build_recorder().handle();

        Harness {
            _dir: dir,
            app: create_api_router(service, prometheus),
            store,
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> axum::http::Response<Body> {
        use tower::Service;
        let mut svc = app.clone().into_service();
        svc.call(req).await.unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn booking(user: &str, start: &str, end: &str) -> Value {
        json!({
            "user_id": user,
            "vehicle_id": "V1",
            "start_at": start,
            "end_at": end,
            "pickup_location": "HANOI",
        })
    }

    async fn body_json(resp: axum::http::Response<Body>) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_reservation_returns_201_with_priced_payload() {
        let h = harness(true).await;

        let resp = send(
            &h.app,
            post_json(
                "/api/v1/reservations",
                booking("U1", "2025-12-01T10:00:00Z", "2025-12-05T10:00:00Z"),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = body_json(resp).await;
        assert_eq!(body["success"], json!(true));
        let data = &body["data"];
        assert_eq!(data["vehicle_id"], json!("V1"));
        assert_eq!(data["daily_rate"], json!(500.0));
        assert_eq!(data["total_days"], json!(4));
        assert_eq!(data["total_price"], json!(2000.0));
        assert_eq!(data["status"], json!("PENDING"));
    }

    #[tokio::test]
    async fn overlapping_request_returns_409() {
        let h = harness(true).await;

        let resp = send(
            &h.app,
            post_json(
                "/api/v1/reservations",
                booking("U1", "2025-12-01T10:00:00Z", "2025-12-05T10:00:00Z"),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = send(
            &h.app,
            post_json(
                "/api/v1/reservations",
                booking("U2", "2025-12-03T00:00:00Z", "2025-12-04T00:00:00Z"),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let body = body_json(resp).await;
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn ineligible_requester_returns_403_and_persists_nothing() {
        let h = harness(false).await;

        let resp = send(
            &h.app,
            post_json(
                "/api/v1/reservations",
                booking("U1", "2025-12-01T10:00:00Z", "2025-12-05T10:00:00Z"),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        use crate::domain::ReservationStore;
        assert!(h.store.find_blocking("V1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_window_returns_400() {
        let h = harness(true).await;

        let resp = send(
            &h.app,
            post_json(
                "/api/v1/reservations",
                booking("U1", "2025-12-05T10:00:00Z", "2025-12-05T10:00:00Z"),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unparseable_instant_returns_400() {
        let h = harness(true).await;

        let resp = send(
            &h.app,
            post_json(
                "/api/v1/reservations",
                booking("U1", "yesterday", "2025-12-05T10:00:00Z"),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_pickup_location_returns_400() {
        let h = harness(true).await;

        let mut body = booking("U1", "2025-12-01T10:00:00Z", "2025-12-05T10:00:00Z");
        body["pickup_location"] = json!("HUE");
        let resp = send(&h.app, post_json("/api/v1/reservations", body)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_reservation_roundtrip() {
        let h = harness(true).await;

        let resp = send(
            &h.app,
            post_json(
                "/api/v1/reservations",
                booking("U1", "2025-12-01T10:00:00Z", "2025-12-05T10:00:00Z"),
            ),
        )
        .await;
        let created = body_json(resp).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let resp = send(&h.app, get(&format!("/api/v1/reservations/{id}"))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["id"], json!(id));
    }

    #[tokio::test]
    async fn get_unknown_reservation_returns_404() {
        let h = harness(true).await;

        let id = uuid::Uuid::new_v4();
        let resp = send(&h.app, get(&format!("/api/v1/reservations/{id}"))).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_malformed_id_returns_400() {
        let h = harness(true).await;

        let resp = send(&h.app, get("/api/v1/reservations/not-a-uuid")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn status_transition_endpoint_enforces_the_table() {
        let h = harness(true).await;

        let resp = send(
            &h.app,
            post_json(
                "/api/v1/reservations",
                booking("U1", "2025-12-01T10:00:00Z", "2025-12-05T10:00:00Z"),
            ),
        )
        .await;
        let created = body_json(resp).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        // PENDING -> CONFIRMED is legal
        let resp = send(
            &h.app,
            post_json(
                &format!("/api/v1/reservations/{id}/status"),
                json!({"status": "CONFIRMED"}),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["status"], json!("CONFIRMED"));

        // CONFIRMED -> REJECTED is not
        let resp = send(
            &h.app,
            post_json(
                &format!("/api/v1/reservations/{id}/status"),
                json!({"status": "REJECTED"}),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // Unknown status strings are rejected up front
        let resp = send(
            &h.app,
            post_json(
                &format!("/api/v1/reservations/{id}/status"),
                json!({"status": "EXPIRED"}),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn metrics_endpoint_renders() {
        let h = harness(true).await;

        let resp = send(&h.app, get("/metrics")).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
