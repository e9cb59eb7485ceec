//! Represents a dining table that reservations are booked against.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A physical table in the restaurant.
///
/// Tables are created by the startup seed and never change afterwards.
/// Inactive tables stay listed but refuse new bookings.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Unique identifier (UUID v4).
    pub id: Uuid,

    /// Display number shown to staff and guests.
    pub number: u32,

    /// Maximum party size.
    pub capacity: u32,

    /// Whether the table accepts new bookings.
    pub is_active: bool,

    /// Optional area label (e.g. "Patio").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    pub created_at: DateTime<Utc>,
}
