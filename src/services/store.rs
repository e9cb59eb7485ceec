//! src/services/store.rs
//!
//! EntityStore: the in-memory home of tables, clients and reservations.
//! It owns plain collections and knows nothing about validation; the
//! admission engine and report layer read it, and only the service mutates it.

use crate::models::{
    client::Client,
    reservation::{Reservation, ReservationStatus},
    table::Table,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

const SEED_TABLE_COUNT: u32 = 10;
const SEED_LOCATIONS: [&str; 3] = ["Patio", "Interior", "Ventana"];
const SEED_CLIENTS: [(&str, &str, &str); 3] = [
    ("John Doe", "555000111", "john@example.com"),
    ("Jane Smith", "555222333", "jane@example.com"),
    ("Peter Jones", "555444555", "peter@example.com"),
];

#[derive(Debug, Default, Clone)]
pub struct EntityStore {
    tables: Vec<Table>,
    clients: Vec<Client>,
    reservations: Vec<Reservation>,
}

impl EntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store filled with the startup fixtures.
    ///
    /// Ten tables (capacity cycling 2/4/6/8, every fifth one inactive),
    /// three clients, and one evening booking on the first table for `today`.
    pub fn seeded(today: NaiveDate) -> Self {
        let mut store = Self::new();
        let now = Utc::now();

        for i in 0..SEED_TABLE_COUNT {
            store.tables.push(Table {
                id: Uuid::new_v4(),
                number: i + 1,
                capacity: (i % 4) * 2 + 2,
                is_active: i % 5 != 0,
                location: Some(SEED_LOCATIONS[(i % 3) as usize].to_string()),
                created_at: now,
            });
        }

        for (full_name, phone, email) in SEED_CLIENTS {
            store.clients.push(Client {
                id: Uuid::new_v4(),
                full_name: full_name.to_string(),
                phone: phone.to_string(),
                email: Some(email.to_string()),
                created_at: now,
            });
        }

        // The first table is inactive; the fixture books it anyway.
        if let (Some(table), Some(client), Some(start), Some(end)) = (
            store.tables.first(),
            store.clients.first(),
            NaiveTime::from_hms_opt(19, 0, 0),
            NaiveTime::from_hms_opt(21, 0, 0),
        ) {
            let reservation = Reservation {
                id: Uuid::new_v4(),
                table_id: table.id,
                client_id: client.id,
                date: today,
                start_time: start,
                end_time: end,
                people: 2,
                notes: Some(String::new()),
                status: ReservationStatus::Booked,
                created_at: now,
            };
            store.reservations.push(reservation);
        }

        store
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn table(&self, id: Uuid) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn client(&self, id: Uuid) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn reservation_mut(&mut self, id: Uuid) -> Option<&mut Reservation> {
        self.reservations.iter_mut().find(|r| r.id == id)
    }

    pub fn add_client(&mut self, client: Client) {
        self.clients.push(client);
    }

    pub fn add_reservation(&mut self, reservation: Reservation) {
        self.reservations.push(reservation);
    }

    /// Reservations on `date`, or every reservation when no date is given.
    pub fn reservations_on(&self, date: Option<NaiveDate>) -> impl Iterator<Item = &Reservation> {
        self.reservations
            .iter()
            .filter(move |r| date.is_none_or(|d| r.date == d))
    }
}
