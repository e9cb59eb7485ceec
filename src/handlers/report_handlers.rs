//! Occupancy and availability views.

use super::date_filter;
use crate::{
    errors::AppError,
    models::time_format,
    services::{
        admission::{self, DATE_FORMAT_HINT, FieldValue, TIME_FORMAT_HINT},
        reports::{CalendarEvent, OccupancyReport, SlotAvailability},
        restaurant_service::RestaurantService,
    },
};
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct OccupancyQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotQuery {
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// GET `/reports/occupancy/day?date=`
pub async fn occupancy_day(
    State(service): State<RestaurantService>,
    Query(q): Query<OccupancyQuery>,
) -> Result<Json<OccupancyReport>, AppError> {
    let date = date_filter(q.date.as_deref())?;
    Ok(Json(service.occupancy(date).await))
}

/// GET `/availability/by-slot?date=&startTime=&endTime=`
pub async fn availability_by_slot(
    State(service): State<RestaurantService>,
    Query(q): Query<SlotQuery>,
) -> Result<Json<SlotAvailability>, AppError> {
    let mut defects = Vec::new();
    let date = admission::required(
        FieldValue::from_query(q.date.as_deref()),
        "date",
        admission::parse_date,
        DATE_FORMAT_HINT,
        &mut defects,
    );
    let start = admission::required(
        FieldValue::from_query(q.start_time.as_deref()),
        "startTime",
        time_format::parse,
        TIME_FORMAT_HINT,
        &mut defects,
    );
    let end = admission::required(
        FieldValue::from_query(q.end_time.as_deref()),
        "endTime",
        time_format::parse,
        TIME_FORMAT_HINT,
        &mut defects,
    );

    match (date, start, end) {
        (Some(date), Some(start), Some(end)) => {
            Ok(Json(service.slot_availability(date, start, end).await))
        }
        _ => Err(AppError::bad_request(defects)),
    }
}

/// GET `/availability/calendar`
pub async fn calendar(State(service): State<RestaurantService>) -> Json<Vec<CalendarEvent>> {
    Json(service.calendar().await)
}
