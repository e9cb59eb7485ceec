//! `GET /tables`: the full table list inside a pagination envelope.
//!
//! Pagination is cosmetic: one page holding every table.

use crate::{models::table::Table, services::restaurant_service::RestaurantService};
use axum::{Json, extract::State};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    /// Wrap `data` as the single page of its own length.
    pub fn single_page(data: Vec<T>) -> Self {
        let total = data.len();
        Self {
            data,
            meta: PageMeta {
                total,
                page: 1,
                limit: total,
                total_pages: 1,
            },
        }
    }
}

pub async fn list_tables(State(service): State<RestaurantService>) -> Json<Paginated<Table>> {
    Json(Paginated::single_page(service.list_tables().await))
}
