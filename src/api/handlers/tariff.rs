//! Fee schedule endpoint

use axum::{extract::State, Json};
use chrono::NaiveTime;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::ApiResponse;
use crate::api::handlers::ApiState;

/// One pricing bracket of the fee schedule
#[derive(Debug, Serialize, ToSchema)]
pub struct FeeIntervalDto {
    /// Bracket start, inclusive
    pub start: NaiveTime,
    /// Bracket end, exclusive
    pub end: NaiveTime,
    /// Fee in local currency units
    pub fee: u32,
}

/// The active tariff
#[derive(Debug, Serialize, ToSchema)]
pub struct TariffResponse {
    /// Pricing brackets in schedule order; times outside every bracket
    /// are free
    pub intervals: Vec<FeeIntervalDto>,
    /// Cap on the summed fee for one calendar day
    pub daily_maximum: u32,
    /// Single-charge grouping window in minutes
    pub single_charge_window_minutes: i64,
}

/// The active fee schedule and billing limits
#[utoipa::path(
    get,
    path = "/api/v1/tariff",
    tag = "Tariff",
    responses(
        (status = 200, description = "The active tariff", body = ApiResponse<TariffResponse>)
    )
)]
pub async fn get_tariff(State(state): State<ApiState>) -> Json<ApiResponse<TariffResponse>> {
    let policy = state.calculator.policy();
    let intervals = state
        .calculator
        .schedule()
        .intervals()
        .iter()
        .map(|interval| FeeIntervalDto {
            start: interval.start,
            end: interval.end,
            fee: interval.fee,
        })
        .collect();

    Json(ApiResponse::success(TariffResponse {
        intervals,
        daily_maximum: policy.daily_maximum,
        single_charge_window_minutes: policy.single_charge_window_minutes,
    }))
}
