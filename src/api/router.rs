//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::ApiResponse;
use crate::api::handlers::{self, calendar, health, tariff, tax, ApiState};
use crate::domain::TaxCalculator;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Tax
        tax::calculate_tax,
        // Tariff
        tariff::get_tariff,
        // Calendar
        calendar::get_calendar,
    ),
    components(
        schemas(
            ApiResponse<tax::TaxResponse>,
            ApiResponse<tariff::TariffResponse>,
            ApiResponse<calendar::CalendarResponse>,
            tax::CalculateTaxRequest,
            tax::TaxResponse,
            tax::ChargeGroupDto,
            tariff::TariffResponse,
            tariff::FeeIntervalDto,
            calendar::CalendarResponse,
            health::HealthResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service availability checks."),
        (name = "Tax", description = "Daily congestion tax calculation. Passages within the single-charge window are billed once at the highest fee; the daily total is capped."),
        (name = "Tariff", description = "The active time-of-day fee schedule. Brackets are half-open `[start, end)`; times outside every bracket are free."),
        (name = "Calendar", description = "Toll-free dates: weekends plus the public holiday calendar of the modeled year."),
    ),
    info(
        title = "Congestion Tax Service API",
        version = "1.0.0",
        description = "REST API for computing the daily congestion tax of the Gothenburg toll zone.

## Response format

Every REST response is wrapped in a standard envelope:
```json
{\"success\": true, \"data\": {...}, \"error\": null}
```

On failure:
```json
{\"success\": false, \"data\": null, \"error\": \"description\"}
```",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(calculator: Arc<TaxCalculator>) -> Router {
    let state = ApiState { calculator };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/tax/calculate", post(handlers::calculate_tax))
        .route("/tariff", get(handlers::get_tariff))
        .route("/calendar/{year}", get(handlers::get_calendar))
        .with_state(state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(handlers::health_check))
        // Tax, tariff, calendar
        .nest("/api/v1", api_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
