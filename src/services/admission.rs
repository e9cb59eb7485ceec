//! src/services/admission.rs
//!
//! Reservation admission control. Every rule is checked and all defects are
//! reported together; only a request with zero defects reaches collision
//! detection, and only a collision-free request is committed to the store.

use crate::{
    models::{
        reservation::{Reservation, ReservationStatus},
        time_format,
    },
    services::{restaurant_service::ServiceError, store::EntityStore},
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use uuid::{Uuid, Variant};

pub const MISSING_REFERENCES: &str = "tableId must be a UUID, clientId must be a UUID";
pub const INVALID_TABLE_REF: &str = "tableId must be a UUID";
pub const INVALID_CLIENT_REF: &str = "clientId must be a UUID";
pub const END_BEFORE_START: &str = "endTime must be after startTime";
pub const INVALID_PEOPLE: &str = "people must be >=1";
pub const OVER_CAPACITY: &str = "people exceeds table capacity";
pub const TABLE_NOT_FOUND: &str = "Table not found";
pub const TABLE_INACTIVE: &str = "Table is inactive";
pub const CLIENT_NOT_FOUND: &str = "Client not found";

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATE_FORMAT_HINT: &str = "a YYYY-MM-DD date";
pub const TIME_FORMAT_HINT: &str = "HH:mm";

/// Body of `POST /reservations`. Every field is an optional untyped JSON
/// value so that missing or wrongly typed fields surface as defects instead
/// of deserialization failures.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReservationRequest {
    pub table_id: Option<Value>,
    pub client_id: Option<Value>,
    pub date: Option<Value>,
    pub start_time: Option<Value>,
    pub end_time: Option<Value>,
    /// Accepts a JSON number or a numeric string.
    pub people: Option<Value>,
    pub notes: Option<Value>,
}

/// A loosely typed input field, classified before any rule looks at it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Not sent, `null`, or an empty string.
    Missing,
    Text(&'a str),
    /// Sent with a non-string JSON type.
    Malformed,
}

impl<'a> FieldValue<'a> {
    pub fn from_json(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => FieldValue::Missing,
            Some(Value::String(s)) => Self::from_query(Some(s.as_str())),
            Some(_) => FieldValue::Malformed,
        }
    }

    pub fn from_query(value: Option<&'a str>) -> Self {
        match value {
            Some(s) if !s.is_empty() => FieldValue::Text(s),
            _ => FieldValue::Missing,
        }
    }

    fn is_missing(self) -> bool {
        self == FieldValue::Missing
    }

    fn text(self) -> Option<&'a str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// A request that passed every validation rule, with its fields parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct AdmittedRequest {
    pub table_id: Uuid,
    pub client_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub people: u32,
    pub notes: Option<String>,
}

impl AdmittedRequest {
    fn into_reservation(self, id: Uuid, created_at: DateTime<Utc>) -> Reservation {
        Reservation {
            id,
            table_id: self.table_id,
            client_id: self.client_id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            people: self.people,
            notes: self.notes,
            status: ReservationStatus::Booked,
            created_at,
        }
    }
}

/// Validate, collision-check and commit a reservation.
pub fn admit(
    request: &ReservationRequest,
    store: &mut EntityStore,
    now: DateTime<Utc>,
) -> Result<Reservation, ServiceError> {
    let admitted = validate(request, store).map_err(ServiceError::Validation)?;

    if let Some(existing) = find_collision(&admitted, store.reservations()) {
        debug!(
            "slot {} {}-{} on table {} collides with reservation {}",
            admitted.date, admitted.start_time, admitted.end_time, admitted.table_id, existing.id
        );
        return Err(ServiceError::Conflict);
    }

    let reservation = admitted.into_reservation(Uuid::new_v4(), now);
    store.add_reservation(reservation.clone());
    Ok(reservation)
}

/// Run every validation rule against `request`, reading lookups from `store`.
///
/// Returns the parsed request when no rule is violated, otherwise every
/// defect in rule order.
pub fn validate(
    request: &ReservationRequest,
    store: &EntityStore,
) -> Result<AdmittedRequest, Vec<String>> {
    let mut defects = Vec::new();

    let table_ref = FieldValue::from_json(request.table_id.as_ref());
    let client_ref = FieldValue::from_json(request.client_id.as_ref());
    if table_ref.is_missing() || client_ref.is_missing() {
        defects.push(MISSING_REFERENCES.to_string());
    } else {
        if !table_ref.text().is_some_and(is_uuid_v4) {
            defects.push(INVALID_TABLE_REF.to_string());
        }
        if !client_ref.text().is_some_and(is_uuid_v4) {
            defects.push(INVALID_CLIENT_REF.to_string());
        }
    }

    let date = required(
        FieldValue::from_json(request.date.as_ref()),
        "date",
        parse_date,
        DATE_FORMAT_HINT,
        &mut defects,
    );
    let start = required(
        FieldValue::from_json(request.start_time.as_ref()),
        "startTime",
        time_format::parse,
        TIME_FORMAT_HINT,
        &mut defects,
    );
    let end = required(
        FieldValue::from_json(request.end_time.as_ref()),
        "endTime",
        time_format::parse,
        TIME_FORMAT_HINT,
        &mut defects,
    );
    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            defects.push(END_BEFORE_START.to_string());
        }
    }

    let people = request
        .people
        .as_ref()
        .and_then(party_size)
        .filter(|n| *n >= 1)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX));
    if people.is_none() {
        defects.push(INVALID_PEOPLE.to_string());
    }

    let table = table_ref
        .text()
        .and_then(|r| Uuid::try_parse(r).ok())
        .and_then(|id| store.table(id));
    match table {
        Some(table) => {
            if people.is_some_and(|p| p > table.capacity) {
                defects.push(OVER_CAPACITY.to_string());
            }
            if !table.is_active {
                defects.push(TABLE_INACTIVE.to_string());
            }
        }
        None => defects.push(TABLE_NOT_FOUND.to_string()),
    }

    let client = client_ref
        .text()
        .and_then(|r| Uuid::try_parse(r).ok())
        .and_then(|id| store.client(id));
    if client.is_none() {
        defects.push(CLIENT_NOT_FOUND.to_string());
    }

    match (table, client, date, start, end, people) {
        (Some(table), Some(client), Some(date), Some(start_time), Some(end_time), Some(people))
            if defects.is_empty() =>
        {
            Ok(AdmittedRequest {
                table_id: table.id,
                client_id: client.id,
                date,
                start_time,
                end_time,
                people,
                notes: request.notes.as_ref().and_then(notes_text),
            })
        }
        _ => Err(defects),
    }
}

/// First BOOKED reservation on the same table and date whose interval
/// overlaps the request.
pub fn find_collision<'a>(
    request: &AdmittedRequest,
    reservations: &'a [Reservation],
) -> Option<&'a Reservation> {
    reservations.iter().find(|r| {
        r.blocks(
            request.table_id,
            request.date,
            request.start_time,
            request.end_time,
        )
    })
}

/// Parse a required field, recording `"<field> is required"` when absent and
/// `"<field> must be <expected>"` when present but unparseable.
pub fn required<T>(
    value: FieldValue<'_>,
    field: &str,
    parse: fn(&str) -> Option<T>,
    expected: &str,
    defects: &mut Vec<String>,
) -> Option<T> {
    match value {
        FieldValue::Missing => {
            defects.push(format!("{} is required", field));
            None
        }
        FieldValue::Text(raw) => {
            let parsed = parse(raw);
            if parsed.is_none() {
                defects.push(format!("{} must be {}", field, expected));
            }
            parsed
        }
        FieldValue::Malformed => {
            defects.push(format!("{} must be {}", field, expected));
            None
        }
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Canonical hyphenated RFC 4122 version-4 UUID.
pub fn is_uuid_v4(value: &str) -> bool {
    value.len() == 36
        && Uuid::try_parse(value)
            .is_ok_and(|id| id.get_version_num() == 4 && id.get_variant() == Variant::RFC4122)
}

/// Free-text notes; scalars other than strings keep their JSON text.
fn notes_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Integer party size from a JSON number or numeric string.
fn party_size(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
