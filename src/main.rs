use anyhow::Result;
use axum::Router;
use chrono::Local;
use std::io::ErrorKind;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod config;
mod errors;
mod handlers;
mod models;
mod routes;
mod services;

use services::{restaurant_service::RestaurantService, store::EntityStore};

#[tokio::main]
async fn main() -> Result<()> {
    // --- Logging setup ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // --- Parse config ---
    let cfg = config::AppConfig::from_env_and_args()?;

    tracing::info!("Starting restaurant-api with config: {:?}", cfg);

    // --- Initialize store ---
    let store = if cfg.seed {
        let today = Local::now().date_naive();
        let store = EntityStore::seeded(today);
        tracing::info!(
            "Seeded {} tables, {} clients, {} reservations for {}",
            store.tables().len(),
            store.clients().len(),
            store.reservations().len(),
            today
        );
        store
    } else {
        tracing::info!("Starting with an empty store");
        EntityStore::new()
    };

    // --- Initialize core service ---
    let service = RestaurantService::new(store);

    // --- Build router ---
    let app: Router = routes::routes::app(service);

    // --- Start server ---
    let addr = cfg.addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err)
            if err.kind() == ErrorKind::PermissionDenied
                && matches!(cfg.host.as_str(), "0.0.0.0" | "::") =>
        {
            let fallback_addr = format!("127.0.0.1:{}", cfg.port);
            tracing::warn!(
                "Permission denied binding to {} ({}). Falling back to {}",
                addr,
                err,
                fallback_addr
            );
            TcpListener::bind(&fallback_addr).await?
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
