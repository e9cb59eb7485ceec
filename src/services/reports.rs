//! Read-only views derived from the store on demand.

use crate::{
    models::{
        reservation::{Reservation, ReservationStatus},
        time_format,
    },
    services::store::EntityStore,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use uuid::Uuid;

const UNKNOWN_CLIENT: &str = "Cliente";
const UNKNOWN_TABLE: &str = "?";

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyReport {
    pub occupancy_percent: u32,
    pub total_reservations: usize,
    /// Active tables minus booked reservations. Goes negative when bookings
    /// outnumber active tables.
    pub available_tables: i64,
    pub cancelled_today: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SlotAvailability {
    pub available: Vec<u32>,
    pub occupied: Vec<u32>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum TableNumber {
    Known(u32),
    Unknown(&'static str),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: Uuid,
    pub title: String,
    pub start: String,
    pub end: String,
    pub status: ReservationStatus,
    pub table_number: TableNumber,
}

/// Occupancy over the reservations on `date`, or over all reservations.
pub fn occupancy(store: &EntityStore, date: Option<NaiveDate>) -> OccupancyReport {
    let mut total = 0usize;
    let mut booked = 0usize;
    let mut cancelled = 0usize;
    for reservation in store.reservations_on(date) {
        total += 1;
        match reservation.status {
            ReservationStatus::Booked => booked += 1,
            ReservationStatus::Cancelled => cancelled += 1,
            ReservationStatus::Completed => {}
        }
    }

    let table_count = store.tables().len();
    let occupancy_percent = if table_count == 0 {
        0
    } else {
        (booked as f64 / table_count as f64 * 100.0).round() as u32
    };
    let active = store.tables().iter().filter(|t| t.is_active).count();

    OccupancyReport {
        occupancy_percent,
        total_reservations: total,
        available_tables: active as i64 - booked as i64,
        cancelled_today: cancelled,
    }
}

/// Split tables by whether a BOOKED reservation holds them during
/// `[start, end)` on `date`. Inactive tables are never available, but are
/// still listed as occupied when booked.
pub fn slot_availability(
    store: &EntityStore,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> SlotAvailability {
    let held: Vec<Uuid> = store
        .reservations()
        .iter()
        .filter(|r| r.blocks_slot(date, start, end))
        .map(|r| r.table_id)
        .collect();

    let available = store
        .tables()
        .iter()
        .filter(|t| t.is_active && !held.contains(&t.id))
        .map(|t| t.number)
        .collect();
    let occupied = store
        .tables()
        .iter()
        .filter(|t| held.contains(&t.id))
        .map(|t| t.number)
        .collect();

    SlotAvailability { available, occupied }
}

/// One event per reservation, whatever its status.
pub fn calendar(store: &EntityStore) -> Vec<CalendarEvent> {
    store
        .reservations()
        .iter()
        .map(|r| calendar_event(store, r))
        .collect()
}

fn calendar_event(store: &EntityStore, reservation: &Reservation) -> CalendarEvent {
    let table_ref = reservation.table_id.to_string();
    let client_name = store
        .client(reservation.client_id)
        .map(|c| c.full_name.as_str())
        .unwrap_or(UNKNOWN_CLIENT);
    let table_number = store
        .table(reservation.table_id)
        .map(|t| TableNumber::Known(t.number))
        .unwrap_or(TableNumber::Unknown(UNKNOWN_TABLE));

    CalendarEvent {
        id: reservation.id,
        title: format!("Mesa {} - {}", &table_ref[..4], client_name),
        start: timestamp(reservation.date, reservation.start_time),
        end: timestamp(reservation.date, reservation.end_time),
        status: reservation.status,
        table_number,
    }
}

fn timestamp(date: NaiveDate, time: NaiveTime) -> String {
    format!("{}T{}:00", date.format("%Y-%m-%d"), time.format(time_format::FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn book(
        store: &mut EntityStore,
        number: u32,
        start: NaiveTime,
        end: NaiveTime,
        status: ReservationStatus,
    ) {
        let table_id = store.tables().iter().find(|t| t.number == number).unwrap().id;
        let client_id = store.clients()[0].id;
        store.add_reservation(Reservation {
            id: Uuid::new_v4(),
            table_id,
            client_id,
            date: day(),
            start_time: start,
            end_time: end,
            people: 2,
            notes: None,
            status,
            created_at: Utc::now(),
        });
    }

    #[test]
    fn occupancy_counts_booked_against_all_tables() {
        let mut store = EntityStore::seeded(day());
        book(&mut store, 2, t(12, 0), t(14, 0), ReservationStatus::Booked);
        book(&mut store, 3, t(12, 0), t(14, 0), ReservationStatus::Booked);
        book(&mut store, 4, t(12, 0), t(14, 0), ReservationStatus::Cancelled);
        book(&mut store, 5, t(12, 0), t(14, 0), ReservationStatus::Completed);

        let report = occupancy(&store, Some(day()));
        assert_eq!(
            report,
            OccupancyReport {
                occupancy_percent: 30,
                total_reservations: 5,
                available_tables: 5,
                cancelled_today: 1,
            }
        );

        let other_day = occupancy(&store, day().succ_opt());
        assert_eq!(other_day.occupancy_percent, 0);
        assert_eq!(other_day.total_reservations, 0);
        assert_eq!(other_day.available_tables, 8);
    }

    #[test]
    fn occupancy_with_no_tables_is_zero() {
        let report = occupancy(&EntityStore::new(), None);
        assert_eq!(report.occupancy_percent, 0);
        assert_eq!(report.available_tables, 0);
    }

    #[test]
    fn available_tables_can_go_negative() {
        let mut store = EntityStore::seeded(day());
        for _ in 0..12 {
            book(&mut store, 2, t(12, 0), t(14, 0), ReservationStatus::Booked);
        }
        let report = occupancy(&store, Some(day()));
        assert_eq!(report.available_tables, 8 - 13);
        assert_eq!(report.occupancy_percent, 130);
    }

    #[test]
    fn slot_availability_splits_tables() {
        let mut store = EntityStore::seeded(day());
        book(&mut store, 2, t(20, 0), t(22, 0), ReservationStatus::Booked);
        book(&mut store, 3, t(21, 0), t(23, 0), ReservationStatus::Booked);
        book(&mut store, 4, t(19, 0), t(21, 0), ReservationStatus::Cancelled);

        let slots = slot_availability(&store, day(), t(19, 0), t(21, 0));
        assert_eq!(slots.occupied, vec![1, 2]);
        assert_eq!(slots.available, vec![3, 4, 5, 7, 8, 9, 10]);
    }

    #[test]
    fn calendar_projects_every_reservation() {
        let mut store = EntityStore::seeded(day());
        book(&mut store, 2, t(12, 0), t(13, 30), ReservationStatus::Cancelled);
        let events = calendar(&store);
        assert_eq!(events.len(), 2);

        let event = &events[1];
        let table_id = store.tables()[1].id.to_string();
        assert_eq!(event.title, format!("Mesa {} - John Doe", &table_id[..4]));
        assert_eq!(event.start, "2024-01-01T12:00:00");
        assert_eq!(event.end, "2024-01-01T13:30:00");
        assert_eq!(event.status, ReservationStatus::Cancelled);
        assert_eq!(event.table_number, TableNumber::Known(2));
    }

    #[test]
    fn calendar_uses_placeholders_for_dangling_references() {
        let mut store = EntityStore::new();
        store.add_reservation(Reservation {
            id: Uuid::new_v4(),
            table_id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            date: day(),
            start_time: t(19, 0),
            end_time: t(21, 0),
            people: 2,
            notes: None,
            status: ReservationStatus::Booked,
            created_at: Utc::now(),
        });

        let events = calendar(&store);
        assert!(events[0].title.ends_with(" - Cliente"));
        let json = serde_json::to_value(&events[0]).unwrap();
        assert_eq!(json["tableNumber"], "?");
        assert_eq!(json["status"], "BOOKED");
    }
}
