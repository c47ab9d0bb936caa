//! Tax calculation endpoint

use axum::{extract::State, http::StatusCode, Json};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::handlers::ApiState;
use crate::domain::VehicleCategory;

/// Accepted timestamp forms: the toll system's plain form and ISO-8601.
const PASSAGE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Request to calculate one day's congestion tax
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CalculateTaxRequest {
    /// Vehicle category token: `car`, `motorcycle`, `bus`, `emergency`,
    /// `diplomat`, `foreign` or `military`. Omit it (or send `null`) for
    /// a vehicle without a registered category, which is exempt.
    pub vehicle: Option<String>,
    /// Timestamps of all toll passages on one calendar day, as
    /// `YYYY-MM-DD HH:MM:SS` or ISO-8601 with a `T` separator.
    /// Order does not matter.
    #[serde(default)]
    #[validate(length(max = 10_000, message = "too many passages in one request"))]
    pub passages: Vec<String>,
}

/// One chargeable passage event
#[derive(Debug, Serialize, ToSchema)]
pub struct ChargeGroupDto {
    /// Earliest passage of the group; the single-charge window is
    /// measured from here
    pub anchor: NaiveDateTime,
    /// Number of passages billed together in this group
    pub passage_count: usize,
    /// Charged fee: the highest fee among the group's passages
    pub fee: u32,
}

/// Calculated daily congestion tax
#[derive(Debug, Serialize, ToSchema)]
pub struct TaxResponse {
    /// Echo of the vehicle category, if one was supplied
    pub vehicle: Option<String>,
    /// The calendar day the passages fall on; `null` for an empty day
    pub date: Option<NaiveDate>,
    /// Chargeable events in time order
    pub groups: Vec<ChargeGroupDto>,
    /// Sum of group fees before capping
    pub subtotal: u32,
    /// Final tax, clamped to the daily maximum
    pub total: u32,
    /// The configured daily maximum
    pub daily_maximum: u32,
}

type TaxResult = Result<Json<ApiResponse<TaxResponse>>, (StatusCode, Json<ApiResponse<()>>)>;

/// Calculate the congestion tax for one day of passages
///
/// Groups passages within the single-charge window into one chargeable
/// event each, sums the per-event fees and caps the total at the daily
/// maximum. Passages spanning more than one calendar day are rejected.
#[utoipa::path(
    post,
    path = "/api/v1/tax/calculate",
    tag = "Tax",
    request_body = CalculateTaxRequest,
    responses(
        (status = 200, description = "Calculated tax with per-event breakdown", body = ApiResponse<TaxResponse>),
        (status = 400, description = "Unknown category token, malformed timestamp, cross-day passages or an oversized request")
    )
)]
pub async fn calculate_tax(State(state): State<ApiState>, Json(body): Json<CalculateTaxRequest>) -> TaxResult {
    if let Err(errors) = body.validate() {
        return Err(bad_request(errors.to_string()));
    }

    let vehicle = parse_vehicle(body.vehicle.as_deref()).map_err(bad_request)?;
    let passages = body
        .passages
        .iter()
        .map(|raw| parse_passage(raw))
        .collect::<Result<Vec<_>, _>>()
        .map_err(bad_request)?;

    let breakdown = state
        .calculator
        .daily_tax_breakdown(vehicle, &passages)
        .map_err(|err| bad_request(err.to_string()))?;

    debug!(
        passages = passages.len(),
        groups = breakdown.groups.len(),
        total = breakdown.total,
        "calculated daily tax"
    );

    Ok(Json(ApiResponse::success(TaxResponse {
        vehicle: vehicle.map(|category| category.to_string()),
        date: passages.iter().map(|p| p.date()).min(),
        groups: breakdown
            .groups
            .into_iter()
            .map(|group| ChargeGroupDto {
                anchor: group.anchor,
                passage_count: group.passage_count,
                fee: group.fee,
            })
            .collect(),
        subtotal: breakdown.subtotal,
        total: breakdown.total,
        daily_maximum: state.calculator.policy().daily_maximum,
    })))
}

/// Map an optional category token to a domain category. Absent or blank
/// tokens mean "no vehicle"; an unrecognized non-blank token is an error
/// so that typos don't silently grant exemption.
fn parse_vehicle(token: Option<&str>) -> Result<Option<VehicleCategory>, String> {
    match token.map(str::trim).filter(|t| !t.is_empty()) {
        None => Ok(None),
        Some(token) => token
            .parse::<VehicleCategory>()
            .map(Some)
            .map_err(|err| err.to_string()),
    }
}

fn parse_passage(raw: &str) -> Result<NaiveDateTime, String> {
    let raw = raw.trim();
    PASSAGE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| format!("invalid passage timestamp: {raw}"))
}

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ApiResponse<()>>) {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message)))
}
