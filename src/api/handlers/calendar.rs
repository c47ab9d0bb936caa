//! Toll-free calendar endpoint

use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::ApiResponse;
use crate::api::handlers::ApiState;

/// Toll-free holiday dates for one year
#[derive(Debug, Serialize, ToSchema)]
pub struct CalendarResponse {
    pub year: i32,
    /// Listed holidays in calendar order. Weekends are always toll-free
    /// and are not enumerated here.
    pub toll_free_dates: Vec<NaiveDate>,
}

/// Toll-free holidays for a year
///
/// Years outside the modeled calendar return an empty list.
#[utoipa::path(
    get,
    path = "/api/v1/calendar/{year}",
    tag = "Calendar",
    params(
        ("year" = i32, Path, description = "Calendar year, e.g. 2013")
    ),
    responses(
        (status = 200, description = "Holiday dates for the year", body = ApiResponse<CalendarResponse>)
    )
)]
pub async fn get_calendar(
    State(state): State<ApiState>,
    Path(year): Path<i32>,
) -> Json<ApiResponse<CalendarResponse>> {
    Json(ApiResponse::success(CalendarResponse {
        year,
        toll_free_dates: state.calculator.calendar().holidays_in(year),
    }))
}
