use axum::Router;

pub mod common;
pub mod inventory;
pub mod products;
pub mod system;
pub mod warehouses;

/// Router for all domain endpoints.
pub fn router() -> Router {
    Router::new()
        .merge(warehouses::router())
        .merge(inventory::router())
        .merge(products::router())
}
