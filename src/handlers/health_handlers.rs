//! Health & service metadata handlers.
//!
//! - GET /api/v1/health -> simple liveness ("ok")
//! - GET /              -> service name, version and top-level endpoints

use crate::routes::routes::API_PREFIX;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

/// `GET /health`
///
/// Liveness check. Always 200 with a plain JSON body; never touches the store.
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".into(),
        }),
    )
}

/// `GET /`
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Restaurant API running".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        endpoints: ["tables", "clients", "reservations"]
            .iter()
            .map(|resource| format!("{}/{}", API_PREFIX, resource))
            .collect(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
pub struct ServiceInfo {
    message: String,
    version: String,
    endpoints: Vec<String>,
}
