use serde::Deserialize;

use stockyard_inventory::{AddStock, WarehouseDraft};
use stockyard_products::ProductDraft;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct WarehouseRequest {
    pub name: String,
    pub location: String,
    pub max_capacity: i64,
}

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryRequest {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub quantity: i64,
    pub storage_location: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryRequest {
    pub quantity: i64,
    pub storage_location: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferQuery {
    pub from_warehouse: String,
    pub to_warehouse: String,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

// -------------------------
// Domain mapping
// -------------------------

impl From<WarehouseRequest> for WarehouseDraft {
    fn from(req: WarehouseRequest) -> Self {
        Self {
            name: req.name,
            location: req.location,
            max_capacity: req.max_capacity,
        }
    }
}

impl From<ProductRequest> for ProductDraft {
    fn from(req: ProductRequest) -> Self {
        Self {
            sku: req.sku,
            name: req.name,
            description: req.description,
            category: req.category,
        }
    }
}

impl From<CreateInventoryRequest> for AddStock {
    fn from(req: CreateInventoryRequest) -> Self {
        Self {
            product: ProductDraft {
                sku: req.sku,
                name: req.name,
                description: req.description,
                category: req.category,
            },
            quantity: req.quantity,
            storage_location: req.storage_location,
        }
    }
}
