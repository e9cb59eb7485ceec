//! Represents a guest who can hold reservations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// Case-insensitive substring match on the full name.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.full_name
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}
