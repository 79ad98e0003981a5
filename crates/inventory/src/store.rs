//! Single owner of warehouse, inventory and product state.
//!
//! Every mutation takes the write lock, runs all of its checks, and only then
//! changes state; readers take the read lock and get owned snapshots. Writers
//! are therefore serialized and no reader can observe a half-applied transfer.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use stockyard_core::{DomainError, DomainResult, Entity, InventoryLineId, ProductId, WarehouseId};
use stockyard_products::{DepartmentCatalog, Product, ProductCatalog, ProductDraft, ProductResolution};

use crate::ledger::{InventoryLedger, InventoryLine, LineSearch};
use crate::transfer::{self, TransferOutcome, TransferRequest};
use crate::warehouse::{Warehouse, WarehouseDraft, WarehouseRegistry};

/// Command: put stock of a (possibly new) product into a warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddStock {
    pub product: ProductDraft,
    pub quantity: i64,
    pub storage_location: String,
}

#[derive(Debug, Default)]
struct StoreState {
    registry: WarehouseRegistry,
    ledger: InventoryLedger,
    products: ProductCatalog,
}

/// In-process inventory store (dev/test and single-node deployments).
#[derive(Debug)]
pub struct InventoryStore {
    state: RwLock<StoreState>,
    departments: DepartmentCatalog,
}

impl InventoryStore {
    pub fn new(departments: DepartmentCatalog) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            departments,
        }
    }

    pub fn departments(&self) -> &DepartmentCatalog {
        &self.departments
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|_| DomainError::internal("inventory store lock poisoned"))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|_| DomainError::internal("inventory store lock poisoned"))
    }

    // -------------------------
    // Warehouses
    // -------------------------

    pub fn list_warehouses(&self) -> DomainResult<Vec<Warehouse>> {
        Ok(self.read()?.registry.list().to_vec())
    }

    pub fn get_warehouse(&self, id: WarehouseId) -> DomainResult<Warehouse> {
        Ok(self.read()?.registry.get(id)?.clone())
    }

    pub fn create_warehouse(&self, draft: &WarehouseDraft) -> DomainResult<Warehouse> {
        let mut state = self.write()?;
        let warehouse = state.registry.create(draft)?;
        tracing::info!(
            warehouse_id = %warehouse.id(),
            max_capacity = warehouse.max_capacity(),
            "warehouse created"
        );
        Ok(warehouse)
    }

    pub fn update_warehouse(&self, id: WarehouseId, draft: &WarehouseDraft) -> DomainResult<Warehouse> {
        let mut state = self.write()?;
        let StoreState { registry, ledger, .. } = &mut *state;
        let warehouse = registry.update(id, draft, ledger).inspect_err(|e| {
            tracing::debug!(warehouse_id = %id, error = %e, "warehouse update rejected");
        })?;
        tracing::info!(warehouse_id = %id, max_capacity = warehouse.max_capacity(), "warehouse updated");
        Ok(warehouse)
    }

    pub fn delete_warehouse(&self, id: WarehouseId) -> DomainResult<()> {
        let mut state = self.write()?;
        let StoreState { registry, ledger, .. } = &mut *state;
        registry.delete(id, ledger).inspect_err(|e| {
            tracing::debug!(warehouse_id = %id, error = %e, "warehouse delete rejected");
        })?;
        tracing::info!(warehouse_id = %id, "warehouse deleted");
        Ok(())
    }

    pub fn current_load(&self, id: WarehouseId) -> DomainResult<i64> {
        let state = self.read()?;
        state.registry.current_load(id, &state.ledger)
    }

    pub fn remaining_capacity(&self, id: WarehouseId) -> DomainResult<i64> {
        let state = self.read()?;
        state.registry.remaining_capacity(id, &state.ledger)
    }

    // -------------------------
    // Inventory lines
    // -------------------------

    pub fn get_line(&self, id: InventoryLineId) -> DomainResult<InventoryLine> {
        Ok(self.read()?.ledger.get(id)?.clone())
    }

    pub fn lines_for_warehouse(&self, warehouse_id: WarehouseId) -> DomainResult<Vec<InventoryLine>> {
        let state = self.read()?;
        state.registry.get(warehouse_id)?;
        Ok(state.ledger.lines_for_warehouse(warehouse_id).cloned().collect())
    }

    pub fn search_lines(
        &self,
        warehouse_id: WarehouseId,
        by: LineSearch,
        query: &str,
    ) -> DomainResult<Vec<InventoryLine>> {
        let state = self.read()?;
        state.registry.get(warehouse_id)?;
        Ok(state.ledger.search(warehouse_id, by, query).cloned().collect())
    }

    /// Add a line for an already catalogued product.
    pub fn add_line(
        &self,
        warehouse_id: WarehouseId,
        product_id: ProductId,
        quantity: i64,
        storage_location: &str,
    ) -> DomainResult<InventoryLine> {
        let mut state = self.write()?;
        let StoreState { registry, ledger, products } = &mut *state;
        let product = products.get(product_id)?.clone();
        let line = ledger
            .add_line(registry, warehouse_id, product, quantity, storage_location)
            .inspect_err(|e| {
                tracing::debug!(warehouse_id = %warehouse_id, error = %e, "add line rejected");
            })?;
        tracing::info!(
            warehouse_id = %warehouse_id,
            line_id = %line.id(),
            quantity,
            "inventory line added"
        );
        Ok(line)
    }

    /// Find-or-create the product by SKU and add a line for it, in one transaction.
    ///
    /// A new product is only stored once the line itself is known to fit.
    pub fn add_stock(&self, warehouse_id: WarehouseId, cmd: &AddStock) -> DomainResult<InventoryLine> {
        let mut state = self.write()?;
        let StoreState { registry, ledger, products } = &mut *state;

        registry.get(warehouse_id)?;
        let resolution = products.resolve(&cmd.product, &self.departments)?;
        let pending = ledger
            .prepare_add(registry, warehouse_id, cmd.quantity, &cmd.storage_location)
            .inspect_err(|e| {
                tracing::debug!(warehouse_id = %warehouse_id, error = %e, "add stock rejected");
            })?;

        if let ProductResolution::New(p) = &resolution {
            tracing::info!(product_id = %p.id(), sku = p.sku(), "product created");
        }
        let product = products.commit(resolution);
        let line = ledger.insert(pending, product);
        tracing::info!(
            warehouse_id = %warehouse_id,
            line_id = %line.id(),
            sku = line.product().sku(),
            quantity = line.quantity(),
            "stock added"
        );
        Ok(line)
    }

    pub fn update_line(
        &self,
        id: InventoryLineId,
        quantity: i64,
        storage_location: &str,
    ) -> DomainResult<InventoryLine> {
        let mut state = self.write()?;
        let StoreState { registry, ledger, .. } = &mut *state;
        let line = ledger
            .update_line(registry, id, quantity, storage_location)
            .inspect_err(|e| {
                tracing::debug!(line_id = %id, error = %e, "line update rejected");
            })?;
        tracing::info!(line_id = %id, quantity, "inventory line updated");
        Ok(line)
    }

    pub fn remove_line(&self, id: InventoryLineId) -> DomainResult<InventoryLine> {
        let line = self.write()?.ledger.remove_line(id)?;
        tracing::info!(line_id = %id, warehouse_id = %line.warehouse_id(), "inventory line removed");
        Ok(line)
    }

    pub fn transfer(
        &self,
        line_id: InventoryLineId,
        from_warehouse: WarehouseId,
        to_warehouse: WarehouseId,
        quantity: i64,
    ) -> DomainResult<TransferOutcome> {
        let request = TransferRequest {
            line_id,
            from_warehouse,
            to_warehouse,
            quantity,
            occurred_at: Utc::now(),
        };

        let mut state = self.write()?;
        let StoreState { registry, ledger, .. } = &mut *state;
        let outcome = transfer::transfer(registry, ledger, &request).inspect_err(|e| {
            tracing::debug!(line_id = %line_id, error = %e, "transfer rejected");
        })?;
        tracing::info!(
            line_id = %line_id,
            from = %from_warehouse,
            to = %to_warehouse,
            quantity,
            kind = ?outcome.kind,
            "inventory transferred"
        );
        Ok(outcome)
    }

    // -------------------------
    // Products
    // -------------------------

    pub fn list_products(&self) -> DomainResult<Vec<Product>> {
        Ok(self.read()?.products.list().to_vec())
    }

    pub fn get_product(&self, id: ProductId) -> DomainResult<Product> {
        Ok(self.read()?.products.get(id)?.clone())
    }

    pub fn product_by_sku(&self, sku: &str) -> DomainResult<Product> {
        self.read()?
            .products
            .by_sku(sku)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("product with SKU {}", sku.trim())))
    }

    /// Units of the product with `sku` across every warehouse; 0 when no
    /// product has that SKU.
    pub fn total_quantity_by_sku(&self, sku: &str) -> DomainResult<i64> {
        if sku.trim().is_empty() {
            return Err(DomainError::validation("SKU is required"));
        }
        let state = self.read()?;
        Ok(state
            .products
            .by_sku(sku)
            .map(|p| state.ledger.total_for_product(p.id()))
            .unwrap_or(0))
    }

    /// Returns the product and whether it was newly created.
    pub fn find_or_create_product(&self, draft: &ProductDraft) -> DomainResult<(Product, bool)> {
        let mut state = self.write()?;
        let (product, created) = state.products.find_or_create(draft, &self.departments)?;
        if created {
            tracing::info!(product_id = %product.id(), sku = product.sku(), "product created");
        }
        Ok((product, created))
    }
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new(DepartmentCatalog::default())
    }
}
