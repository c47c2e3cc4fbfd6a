pub mod handlers;
pub mod response;

use crate::core::store::InMemoryStore;
use crate::core::{Organization, RecordStore, Shipment};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Stores shared by every request. Built once by the binary and handed to
/// the router; tests can swap in their own `RecordStore` implementations.
pub struct AppState<S = InMemoryStore<Shipment>, O = InMemoryStore<Organization>> {
    pub shipments: S,
    pub organizations: O,
}

impl AppState {
    pub fn in_memory() -> Self {
        Self {
            shipments: InMemoryStore::new("shipment"),
            organizations: InMemoryStore::new("organization"),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<S, O> AppState<S, O> {
    pub fn new(shipments: S, organizations: O) -> Self {
        Self {
            shipments,
            organizations,
        }
    }
}

pub fn router<S, O>(state: Arc<AppState<S, O>>) -> Router
where
    S: RecordStore<Shipment> + 'static,
    O: RecordStore<Organization> + 'static,
{
    Router::new()
        .route("/shipment", post(handlers::create_shipment::<S, O>))
        .route("/organization", post(handlers::create_organization::<S, O>))
        .route("/shipments/:shipment_id", get(handlers::get_shipment::<S, O>))
        .route(
            "/organizations/:organization_id",
            get(handlers::get_organization::<S, O>),
        )
        .route("/totalWeight", get(handlers::total_weight::<S, O>))
        .with_state(state)
}

pub async fn serve<S, O>(listener: TcpListener, state: Arc<AppState<S, O>>) -> std::io::Result<()>
where
    S: RecordStore<Shipment> + 'static,
    O: RecordStore<Organization> + 'static,
{
    axum::serve(listener, router(state)).await
}
