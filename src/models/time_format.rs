//! The `HH:mm` wall-clock format used on the wire.

use chrono::NaiveTime;
use serde::Serializer;

pub const FORMAT: &str = "%H:%M";

/// Parse an `HH:mm` string into a `NaiveTime`.
pub fn parse(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), FORMAT).ok()
}

pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&time.format(FORMAT))
}
