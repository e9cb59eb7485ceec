pub mod admission;
pub mod reports;
pub mod restaurant_service;
pub mod store;
