//! HTTP handlers for reservation listing, admission and status changes.
//! Validation and collision detection live in the admission engine; these
//! handlers only map its outcomes onto status codes.

use super::date_filter;
use crate::{
    errors::AppError,
    models::reservation::Reservation,
    services::{admission::ReservationRequest, restaurant_service::RestaurantService},
};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    success: bool,
}

/// GET `/reservations?date=`: exact-date filter when given.
pub async fn list_reservations(
    State(service): State<RestaurantService>,
    Query(q): Query<DateQuery>,
) -> Result<Json<Vec<Reservation>>, AppError> {
    let date = date_filter(q.date.as_deref())?;
    Ok(Json(service.list_reservations(date).await))
}

/// POST `/reservations`: 201 on admission, 400 with every defect, 409 on a
/// booked overlap.
pub async fn create_reservation(
    State(service): State<RestaurantService>,
    payload: Result<Json<ReservationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Reservation>), AppError> {
    let Json(request) = payload?;
    let reservation = service.create_reservation(request).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// POST `/reservations/{id}/cancel`
pub async fn cancel_reservation(
    State(service): State<RestaurantService>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    service.cancel_reservation(&id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// POST `/reservations/{id}/complete`
pub async fn complete_reservation(
    State(service): State<RestaurantService>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    service.complete_reservation(&id).await?;
    Ok(Json(SuccessResponse { success: true }))
}
