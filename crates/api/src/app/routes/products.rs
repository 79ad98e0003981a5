use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use stockyard_core::ProductId;
use stockyard_inventory::InventoryStore;
use stockyard_products::ProductDraft;

use crate::app::routes::common::{json_body, parse_id, respond};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/products", get(list_products).post(find_or_create_product))
        .route("/products/departments", get(departments))
        .route("/products/sku/:sku", get(product_by_sku))
        .route("/products/:id", get(get_product))
}

pub async fn list_products(Extension(store): Extension<Arc<InventoryStore>>) -> Response {
    respond(StatusCode::OK, store.list_products())
}

pub async fn get_product(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(id): Path<String>,
) -> Response {
    let id: ProductId = match parse_id(&id) {
        Ok(v) => v,
        Err(r) => return r,
    };
    respond(StatusCode::OK, store.get_product(id))
}

pub async fn product_by_sku(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(sku): Path<String>,
) -> Response {
    respond(StatusCode::OK, store.product_by_sku(&sku))
}

/// Returns `201` when the SKU was new, `200` with the existing product otherwise.
pub async fn find_or_create_product(
    Extension(store): Extension<Arc<InventoryStore>>,
    body: Result<Json<dto::ProductRequest>, JsonRejection>,
) -> Response {
    let body = match json_body(body) {
        Ok(v) => v,
        Err(r) => return r,
    };
    match store.find_or_create_product(&ProductDraft::from(body)) {
        Ok((product, true)) => (StatusCode::CREATED, Json(product)).into_response(),
        Ok((product, false)) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn departments(Extension(store): Extension<Arc<InventoryStore>>) -> Response {
    (StatusCode::OK, Json(store.departments().names())).into_response()
}
