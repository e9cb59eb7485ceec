//! Defines routes for the reservation API.
//!
//! ## Structure
//! All API routes are nested under `/api/v1`:
//!
//! - **Tables & clients**
//!   - `GET    /tables`: every table in a single-page envelope
//!   - `GET    /clients?search=`: name search
//!   - `POST   /clients`: register client
//!
//! - **Reservations**
//!   - `GET    /reservations?date=`: list, optionally for one day
//!   - `POST   /reservations`: admit a booking
//!   - `POST   /reservations/{id}/cancel`
//!   - `POST   /reservations/{id}/complete`
//!
//! - **Reports**
//!   - `GET    /reports/occupancy/day?date=`
//!   - `GET    /availability/by-slot?date=&startTime=&endTime=`
//!   - `GET    /availability/calendar`
//!
//! `GET /` (service metadata) stays at the root.

use crate::{
    handlers::{
        client_handlers::{create_client, list_clients},
        health_handlers::{health, root},
        report_handlers::{availability_by_slot, calendar, occupancy_day},
        reservation_handlers::{
            cancel_reservation, complete_reservation, create_reservation, list_reservations,
        },
        table_handlers::list_tables,
    },
    services::restaurant_service::RestaurantService,
};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub const API_PREFIX: &str = "/api/v1";

/// Build and return the router for every API route.
///
/// The router carries shared state (`RestaurantService`) to all handlers.
pub fn routes() -> Router<RestaurantService> {
    let api = Router::new()
        .route("/health", get(health))
        .route("/tables", get(list_tables))
        .route("/clients", get(list_clients).post(create_client))
        .route(
            "/reservations",
            get(list_reservations).post(create_reservation),
        )
        .route("/reservations/{id}/cancel", post(cancel_reservation))
        .route("/reservations/{id}/complete", post(complete_reservation))
        .route("/reports/occupancy/day", get(occupancy_day))
        .route("/availability/by-slot", get(availability_by_slot))
        .route("/availability/calendar", get(calendar));

    Router::new().route("/", get(root)).nest(API_PREFIX, api)
}

/// Routes with state and middleware applied; what the server actually runs.
pub fn app(service: RestaurantService) -> Router {
    routes()
        .with_state(service)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::EntityStore;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use chrono::NaiveDate;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn seeded_app() -> Router {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        app(RestaurantService::new(EntityStore::seeded(day)))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn table_id(app: &Router, number: u64) -> String {
        let (_, body) = send(app, "GET", "/api/v1/tables", None).await;
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|t| t["number"] == number)
            .map(|t| t["id"].as_str().unwrap().to_string())
            .unwrap()
    }

    async fn client_id(app: &Router) -> String {
        let (_, body) = send(app, "GET", "/api/v1/clients?search=jane", None).await;
        body[0]["id"].as_str().unwrap().to_string()
    }

    async fn book(
        app: &Router,
        table: u64,
        start: &str,
        end: &str,
        people: u64,
    ) -> (StatusCode, Value) {
        let body = json!({
            "tableId": table_id(app, table).await,
            "clientId": client_id(app).await,
            "date": "2024-01-01",
            "startTime": start,
            "endTime": end,
            "people": people,
        });
        send(app, "POST", "/api/v1/reservations", Some(body)).await
    }

    #[tokio::test]
    async fn health_and_root() {
        let app = seeded_app();
        let (status, body) = send(&app, "GET", "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));

        let (status, body) = send(&app, "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Restaurant API running");
        assert_eq!(body["endpoints"][0], "/api/v1/tables");
    }

    #[tokio::test]
    async fn tables_come_in_a_single_page_envelope() {
        let app = seeded_app();
        let (status, body) = send(&app, "GET", "/api/v1/tables", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 10);
        assert_eq!(
            body["meta"],
            json!({ "total": 10, "page": 1, "limit": 10, "totalPages": 1 })
        );
        assert_eq!(body["data"][0]["isActive"], false);
        assert_eq!(body["data"][1]["capacity"], 4);
    }

    #[tokio::test]
    async fn client_registration() {
        let app = seeded_app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/clients",
            Some(json!({ "fullName": "Maria Lopez", "phone": "555777888" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["fullName"], "Maria Lopez");
        assert!(body.get("email").is_none());

        let (_, found) = send(&app, "GET", "/api/v1/clients?search=LOPEZ", None).await;
        assert_eq!(found.as_array().unwrap().len(), 1);

        let (status, body) = send(&app, "POST", "/api/v1/clients", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "message": ["fullName is required", "phone is required"] })
        );
    }

    #[tokio::test]
    async fn booking_is_listed_for_its_date() {
        let app = seeded_app();
        let (status, created) = book(&app, 2, "19:00", "21:00", 4).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "BOOKED");
        assert_eq!(created["startTime"], "19:00");

        let (_, listed) = send(&app, "GET", "/api/v1/reservations?date=2024-01-01", None).await;
        let ids: Vec<&Value> = listed.as_array().unwrap().iter().map(|r| &r["id"]).collect();
        assert!(ids.contains(&&created["id"]));

        let (_, other_day) = send(&app, "GET", "/api/v1/reservations?date=2024-01-02", None).await;
        assert!(other_day.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn overlap_conflicts_touching_does_not() {
        let app = seeded_app();
        assert_eq!(book(&app, 3, "19:00", "21:00", 2).await.0, StatusCode::CREATED);

        let (status, body) = book(&app, 3, "20:00", "22:00", 2).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, json!({ "message": "Time slot not available for this table." }));

        assert_eq!(book(&app, 3, "21:00", "23:00", 2).await.0, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn party_size_is_validated() {
        let app = seeded_app();
        let (status, body) = book(&app, 2, "19:00", "21:00", 5).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let messages = body["message"].as_array().unwrap();
        assert!(messages.iter().any(|m| m.as_str().unwrap().contains("capacity")));

        let (status, body) = book(&app, 2, "19:00", "21:00", 0).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": ["people must be >=1"] }));
    }

    #[tokio::test]
    async fn wrongly_typed_fields_still_report_every_defect() {
        let app = seeded_app();
        let body = json!({
            "tableId": 5,
            "clientId": "x",
            "date": "2024-01-01",
            "startTime": "19:00",
            "endTime": "21:00",
            "people": 0,
        });
        let (status, body) = send(&app, "POST", "/api/v1/reservations", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "message": [
                    "tableId must be a UUID",
                    "clientId must be a UUID",
                    "people must be >=1",
                    "Table not found",
                    "Client not found",
                ]
            })
        );
    }

    #[tokio::test]
    async fn cancelled_slot_can_be_rebooked() {
        let app = seeded_app();
        let (_, first) = book(&app, 4, "19:00", "21:00", 2).await;
        let id = first["id"].as_str().unwrap();

        let (status, body) = send(&app, "POST", &format!("/api/v1/reservations/{}/cancel", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));

        assert_eq!(book(&app, 4, "19:00", "21:00", 2).await.0, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn occupancy_report_for_a_day() {
        let app = seeded_app();
        book(&app, 2, "12:00", "14:00", 2).await;
        book(&app, 3, "12:00", "14:00", 2).await;

        let (status, body) = send(&app, "GET", "/api/v1/reports/occupancy/day?date=2024-01-01", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "occupancyPercent": 30,
                "totalReservations": 3,
                "availableTables": 5,
                "cancelledToday": 0,
            })
        );
    }

    #[tokio::test]
    async fn availability_by_slot() {
        let app = seeded_app();
        book(&app, 2, "20:00", "22:00", 2).await;
        book(&app, 5, "21:00", "22:00", 2).await;

        let (status, body) = send(
            &app,
            "GET",
            "/api/v1/availability/by-slot?date=2024-01-01&startTime=19:00&endTime=21:00",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "available": [3, 4, 5, 7, 8, 9, 10], "occupied": [1, 2] })
        );

        let (status, body) = send(&app, "GET", "/api/v1/availability/by-slot?date=2024-01-01", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "message": ["startTime is required", "endTime is required"] })
        );
    }

    #[tokio::test]
    async fn calendar_lists_every_reservation() {
        let app = seeded_app();
        book(&app, 2, "12:00", "13:00", 2).await;

        let (status, body) = send(&app, "GET", "/api/v1/availability/calendar", None).await;
        assert_eq!(status, StatusCode::OK);
        let events = body.as_array().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["start"], "2024-01-01T19:00:00");
        assert_eq!(events[0]["tableNumber"], 1);
        assert!(events[1]["title"].as_str().unwrap().ends_with(" - Jane Smith"));
    }

    #[tokio::test]
    async fn unknown_reservation_is_404() {
        let app = seeded_app();
        for action in ["cancel", "complete"] {
            let uri = format!("/api/v1/reservations/{}/{}", uuid::Uuid::new_v4(), action);
            let (status, body) = send(&app, "POST", &uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, json!({ "message": "Reservation not found" }));
        }
    }

    #[tokio::test]
    async fn malformed_input_is_a_bad_request() {
        let app = seeded_app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/reservations")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, "GET", "/api/v1/reservations?date=tomorrow", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": ["date must be a YYYY-MM-DD date"] }));
    }
}
