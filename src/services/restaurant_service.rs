//! src/services/restaurant_service.rs
//!
//! RestaurantService: the single entry point the HTTP layer talks to. It owns
//! the entity store behind one async mutex; every operation takes the lock
//! once, so a reservation is validated, collision-checked and appended
//! without another request interleaving.

use crate::{
    models::{
        client::Client,
        reservation::{Reservation, ReservationStatus},
        table::Table,
    },
    services::{
        admission::{self, ReservationRequest},
        reports::{self, CalendarEvent, OccupancyReport, SlotAvailability},
        store::EntityStore,
    },
};
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

pub const SLOT_TAKEN: &str = "Time slot not available for this table.";
pub const RESERVATION_NOT_FOUND: &str = "Reservation not found";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request rejected: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("{}", SLOT_TAKEN)]
    Conflict,
    #[error("{}", RESERVATION_NOT_FOUND)]
    ReservationNotFound,
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Body of `POST /clients`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewClientRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone)]
pub struct RestaurantService {
    store: Arc<Mutex<EntityStore>>,
}

impl RestaurantService {
    pub fn new(store: EntityStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    pub async fn list_tables(&self) -> Vec<Table> {
        self.store.lock().await.tables().to_vec()
    }

    /// Clients whose name contains `search` (case-insensitive), or all
    /// clients when the search is empty.
    pub async fn search_clients(&self, search: Option<&str>) -> Vec<Client> {
        let store = self.store.lock().await;
        match search.filter(|s| !s.is_empty()) {
            Some(needle) => store
                .clients()
                .iter()
                .filter(|c| c.name_contains(needle))
                .cloned()
                .collect(),
            None => store.clients().to_vec(),
        }
    }

    pub async fn create_client(&self, request: NewClientRequest) -> ServiceResult<Client> {
        let full_name = request.full_name.filter(|v| !v.is_empty());
        let phone = request.phone.filter(|v| !v.is_empty());

        let (full_name, phone) = match (full_name, phone) {
            (Some(full_name), Some(phone)) => (full_name, phone),
            (full_name, phone) => {
                let mut defects = Vec::new();
                if full_name.is_none() {
                    defects.push("fullName is required".to_string());
                }
                if phone.is_none() {
                    defects.push("phone is required".to_string());
                }
                return Err(ServiceError::Validation(defects));
            }
        };

        let client = Client {
            id: Uuid::new_v4(),
            full_name,
            phone,
            email: request.email,
            created_at: Utc::now(),
        };
        self.store.lock().await.add_client(client.clone());
        info!("registered client {}", client.id);
        Ok(client)
    }

    pub async fn list_reservations(&self, date: Option<NaiveDate>) -> Vec<Reservation> {
        self.store
            .lock()
            .await
            .reservations_on(date)
            .cloned()
            .collect()
    }

    pub async fn create_reservation(
        &self,
        request: ReservationRequest,
    ) -> ServiceResult<Reservation> {
        let mut store = self.store.lock().await;
        match admission::admit(&request, &mut store, Utc::now()) {
            Ok(reservation) => {
                info!(
                    "booked table {} on {} {}-{} as reservation {}",
                    reservation.table_id,
                    reservation.date,
                    reservation.start_time.format("%H:%M"),
                    reservation.end_time.format("%H:%M"),
                    reservation.id
                );
                Ok(reservation)
            }
            Err(err) => {
                debug!("reservation rejected: {}", err);
                Err(err)
            }
        }
    }

    pub async fn cancel_reservation(&self, id: &str) -> ServiceResult<()> {
        self.set_status(id, ReservationStatus::Cancelled).await
    }

    pub async fn complete_reservation(&self, id: &str) -> ServiceResult<()> {
        self.set_status(id, ReservationStatus::Completed).await
    }

    /// Overwrite the status of reservation `id`.
    ///
    /// The prior status is not checked, so a completed reservation can still
    /// be cancelled and vice versa. Candidate tightening: only allow the
    /// transition out of BOOKED.
    async fn set_status(&self, id: &str, status: ReservationStatus) -> ServiceResult<()> {
        let id = Uuid::try_parse(id).map_err(|_| ServiceError::ReservationNotFound)?;
        let mut store = self.store.lock().await;
        let reservation = store
            .reservation_mut(id)
            .ok_or(ServiceError::ReservationNotFound)?;
        debug!("reservation {} {:?} -> {:?}", id, reservation.status, status);
        reservation.status = status;
        info!("reservation {} is now {:?}", id, status);
        Ok(())
    }

    pub async fn occupancy(&self, date: Option<NaiveDate>) -> OccupancyReport {
        reports::occupancy(&*self.store.lock().await, date)
    }

    pub async fn slot_availability(
        &self,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> SlotAvailability {
        reports::slot_availability(&*self.store.lock().await, date, start, end)
    }

    pub async fn calendar(&self) -> Vec<CalendarEvent> {
        reports::calendar(&*self.store.lock().await)
    }
}
