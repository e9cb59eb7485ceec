//! Core data models for the restaurant reservation service.
//!
//! These entities serialize as camelCase JSON via `serde`, matching the
//! wire format of the HTTP API.

pub mod client;
pub mod reservation;
pub mod table;
pub mod time_format;
