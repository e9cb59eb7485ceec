pub mod client_handlers;
pub mod health_handlers;
pub mod report_handlers;
pub mod reservation_handlers;
pub mod table_handlers;

use crate::{errors::AppError, services::admission};
use chrono::NaiveDate;

/// Parse an optional `?date=` filter. Empty means "no filter".
fn date_filter(raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw.filter(|d| !d.is_empty()) {
        None => Ok(None),
        Some(raw) => admission::parse_date(raw)
            .map(Some)
            .ok_or_else(|| {
                AppError::bad_request(vec![format!("date must be {}", admission::DATE_FORMAT_HINT)])
            }),
    }
}
