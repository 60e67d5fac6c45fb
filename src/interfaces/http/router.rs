//! API Router with Swagger UI

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::BookingService;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::modules::reservations;
use crate::interfaces::http::modules::reservations::handlers::ReservationAppState;
use crate::interfaces::http::modules::reservations::{
    CreateReservationRequest, ReservationDto, UpdateStatusRequest,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        reservations::handlers::create_reservation,
        reservations::handlers::get_reservation,
        reservations::handlers::update_reservation_status,
    ),
    components(schemas(
        CreateReservationRequest,
        UpdateStatusRequest,
        ReservationDto,
        ApiResponse<ReservationDto>,
    )),
    tags(
        (name = "Reservations", description = "Vehicle reservation workflow")
    ),
    info(
        title = "Rental Booking API",
        description = "Car-rental reservation service"
    )
)]
struct ApiDoc;

/// Build the service's HTTP router.
///
/// All state is injected here by the process entry point; handlers never
/// reach for ambient globals.
pub fn create_api_router(
    service: Arc<BookingService>,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let state = ReservationAppState { service };

    let api = Router::new()
        .route(
            "/api/v1/reservations",
            post(reservations::handlers::create_reservation),
        )
        .route(
            "/api/v1/reservations/{id}",
            get(reservations::handlers::get_reservation),
        )
        .route(
            "/api/v1/reservations/{id}/status",
            post(reservations::handlers::update_reservation_status),
        )
        .with_state(state);

    let metrics = get(move || {
        let handle = prometheus_handle.clone();
        async move { handle.render() }
    });

    Router::new()
        .merge(api)
        .route("/metrics", metrics)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
