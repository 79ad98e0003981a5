use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use stockyard_core::WarehouseId;
use stockyard_inventory::{InventoryStore, WarehouseDraft};

use crate::app::routes::common::{json_body, parse_id, respond};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/warehouses", get(list_warehouses).post(create_warehouse))
        .route(
            "/warehouses/:id",
            get(get_warehouse).put(update_warehouse).delete(delete_warehouse),
        )
        .route("/warehouses/:id/current-load", get(current_load))
        .route("/warehouses/:id/capacity", get(remaining_capacity))
}

pub async fn list_warehouses(Extension(store): Extension<Arc<InventoryStore>>) -> Response {
    respond(StatusCode::OK, store.list_warehouses())
}

pub async fn get_warehouse(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(id): Path<String>,
) -> Response {
    let id: WarehouseId = match parse_id(&id) {
        Ok(v) => v,
        Err(r) => return r,
    };
    respond(StatusCode::OK, store.get_warehouse(id))
}

pub async fn create_warehouse(
    Extension(store): Extension<Arc<InventoryStore>>,
    body: Result<Json<dto::WarehouseRequest>, JsonRejection>,
) -> Response {
    let body = match json_body(body) {
        Ok(v) => v,
        Err(r) => return r,
    };
    respond(StatusCode::CREATED, store.create_warehouse(&WarehouseDraft::from(body)))
}

pub async fn update_warehouse(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(id): Path<String>,
    body: Result<Json<dto::WarehouseRequest>, JsonRejection>,
) -> Response {
    let id: WarehouseId = match parse_id(&id) {
        Ok(v) => v,
        Err(r) => return r,
    };
    let body = match json_body(body) {
        Ok(v) => v,
        Err(r) => return r,
    };
    respond(StatusCode::OK, store.update_warehouse(id, &WarehouseDraft::from(body)))
}

pub async fn delete_warehouse(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(id): Path<String>,
) -> Response {
    let id: WarehouseId = match parse_id(&id) {
        Ok(v) => v,
        Err(r) => return r,
    };
    match store.delete_warehouse(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn current_load(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(id): Path<String>,
) -> Response {
    let id: WarehouseId = match parse_id(&id) {
        Ok(v) => v,
        Err(r) => return r,
    };
    respond(StatusCode::OK, store.current_load(id))
}

pub async fn remaining_capacity(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(id): Path<String>,
) -> Response {
    let id: WarehouseId = match parse_id(&id) {
        Ok(v) => v,
        Err(r) => return r,
    };
    respond(StatusCode::OK, store.remaining_capacity(id))
}
