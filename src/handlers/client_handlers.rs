//! HTTP handlers for client lookup and registration.

use crate::{
    errors::AppError,
    models::client::Client,
    services::restaurant_service::{NewClientRequest, RestaurantService},
};
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ClientSearchQuery {
    pub search: Option<String>,
}

/// GET `/clients?search=`: case-insensitive name search.
pub async fn list_clients(
    State(service): State<RestaurantService>,
    Query(q): Query<ClientSearchQuery>,
) -> Json<Vec<Client>> {
    Json(service.search_clients(q.search.as_deref()).await)
}

/// POST `/clients`: register a client.
pub async fn create_client(
    State(service): State<RestaurantService>,
    payload: Result<Json<NewClientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Client>), AppError> {
    let Json(request) = payload?;
    let client = service.create_client(request).await?;
    Ok((StatusCode::CREATED, Json(client)))
}
