use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use stockyard_core::{InventoryLineId, WarehouseId};
use stockyard_inventory::{AddStock, InventoryStore, LineSearch};

use crate::app::routes::common::{json_body, parse_id, query_params, respond};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route(
            "/inventory/:id",
            get(get_line).put(update_line).delete(remove_line),
        )
        .route("/inventory/:id/transfer", post(transfer))
        .route("/inventory/sku/:sku/total", get(total_by_sku))
        .route(
            "/inventory/warehouse/:id",
            get(lines_for_warehouse).post(add_stock),
        )
        .route("/inventory/warehouse/:id/search/name", get(search_by_name))
        .route("/inventory/warehouse/:id/search/sku", get(search_by_sku))
}

pub async fn get_line(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(id): Path<String>,
) -> Response {
    let id: InventoryLineId = match parse_id(&id) {
        Ok(v) => v,
        Err(r) => return r,
    };
    respond(StatusCode::OK, store.get_line(id))
}

pub async fn lines_for_warehouse(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(id): Path<String>,
) -> Response {
    let id: WarehouseId = match parse_id(&id) {
        Ok(v) => v,
        Err(r) => return r,
    };
    respond(StatusCode::OK, store.lines_for_warehouse(id))
}

/// Units of one SKU across every warehouse.
pub async fn total_by_sku(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(sku): Path<String>,
) -> Response {
    respond(StatusCode::OK, store.total_quantity_by_sku(&sku))
}

fn search(
    store: &InventoryStore,
    id: &str,
    by: LineSearch,
    query: Result<Query<dto::SearchQuery>, QueryRejection>,
) -> Response {
    let id: WarehouseId = match parse_id(id) {
        Ok(v) => v,
        Err(r) => return r,
    };
    let query = match query_params(query) {
        Ok(v) => v,
        Err(r) => return r,
    };
    respond(StatusCode::OK, store.search_lines(id, by, &query.q))
}

pub async fn search_by_name(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(id): Path<String>,
    query: Result<Query<dto::SearchQuery>, QueryRejection>,
) -> Response {
    search(&store, &id, LineSearch::ProductName, query)
}

pub async fn search_by_sku(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(id): Path<String>,
    query: Result<Query<dto::SearchQuery>, QueryRejection>,
) -> Response {
    search(&store, &id, LineSearch::Sku, query)
}

pub async fn add_stock(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(id): Path<String>,
    body: Result<Json<dto::CreateInventoryRequest>, JsonRejection>,
) -> Response {
    let id: WarehouseId = match parse_id(&id) {
        Ok(v) => v,
        Err(r) => return r,
    };
    let body = match json_body(body) {
        Ok(v) => v,
        Err(r) => return r,
    };
    respond(StatusCode::CREATED, store.add_stock(id, &AddStock::from(body)))
}

pub async fn update_line(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(id): Path<String>,
    body: Result<Json<dto::UpdateInventoryRequest>, JsonRejection>,
) -> Response {
    let id: InventoryLineId = match parse_id(&id) {
        Ok(v) => v,
        Err(r) => return r,
    };
    let body = match json_body(body) {
        Ok(v) => v,
        Err(r) => return r,
    };
    respond(
        StatusCode::OK,
        store.update_line(id, body.quantity, &body.storage_location),
    )
}

pub async fn remove_line(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(id): Path<String>,
) -> Response {
    let id: InventoryLineId = match parse_id(&id) {
        Ok(v) => v,
        Err(r) => return r,
    };
    match store.remove_line(id) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn transfer(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(id): Path<String>,
    query: Result<Query<dto::TransferQuery>, QueryRejection>,
) -> Response {
    let line_id: InventoryLineId = match parse_id(&id) {
        Ok(v) => v,
        Err(r) => return r,
    };
    let query = match query_params(query) {
        Ok(v) => v,
        Err(r) => return r,
    };
    let from: WarehouseId = match parse_id(&query.from_warehouse) {
        Ok(v) => v,
        Err(r) => return r,
    };
    let to: WarehouseId = match parse_id(&query.to_warehouse) {
        Ok(v) => v,
        Err(r) => return r,
    };
    respond(StatusCode::OK, store.transfer(line_id, from, to, query.quantity))
}
