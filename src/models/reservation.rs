//! Represents a booked time slot on a table.

use super::time_format;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Lifecycle state of a reservation.
///
/// `Booked` is the only state that blocks a table; the other two are terminal.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Booked,
    Completed,
    Cancelled,
}

/// A reservation of one table by one client for `[start_time, end_time)` on `date`.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Uuid,

    /// Table being booked.
    pub table_id: Uuid,

    /// Client holding the booking.
    pub client_id: Uuid,

    /// Calendar day, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,

    /// Inclusive start, serialized as `HH:mm`.
    #[serde(serialize_with = "time_format::serialize")]
    pub start_time: NaiveTime,

    /// Exclusive end, serialized as `HH:mm`.
    #[serde(serialize_with = "time_format::serialize")]
    pub end_time: NaiveTime,

    /// Party size.
    pub people: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub status: ReservationStatus,

    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// True when this reservation holds `table_id` on `date` during any part
    /// of `[start, end)`.
    pub fn blocks(
        &self,
        table_id: Uuid,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> bool {
        self.table_id == table_id && self.blocks_slot(date, start, end)
    }

    /// Same as [`Reservation::blocks`] without the table filter.
    pub fn blocks_slot(&self, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> bool {
        self.status == ReservationStatus::Booked
            && self.date == date
            && intervals_overlap(start, end, self.start_time, self.end_time)
    }
}

/// Half-open interval overlap: `[s1, e1)` and `[s2, e2)` overlap iff
/// `s1 < e2 && s2 < e1`. Touching intervals do not overlap.
pub fn intervals_overlap(s1: NaiveTime, e1: NaiveTime, s2: NaiveTime, e2: NaiveTime) -> bool {
    s1 < e2 && s2 < e1
}
