use serde::Serialize;

use stockyard_core::{DomainError, DomainResult, Entity, InventoryLineId, ProductId, WarehouseId};
use stockyard_products::{fold_case, Product};

use crate::warehouse::WarehouseRegistry;

/// Stock of one product at one storage location inside one warehouse.
///
/// The product is embedded by value; products are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryLine {
    id: InventoryLineId,
    warehouse_id: WarehouseId,
    product: Product,
    quantity: i64,
    #[serde(rename = "storageLocation")]
    storage_location: String,
}

impl InventoryLine {
    pub fn warehouse_id(&self) -> WarehouseId {
        self.warehouse_id
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn product_id(&self) -> ProductId {
        self.product.id_typed()
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn storage_location(&self) -> &str {
        &self.storage_location
    }
}

impl Entity for InventoryLine {
    type Id = InventoryLineId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// A line that passed every check in `prepare_add` and only lacks its product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLine {
    warehouse_id: WarehouseId,
    quantity: i64,
    storage_location: String,
}

/// Which product attribute a warehouse search matches against.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LineSearch {
    ProductName,
    Sku,
}

/// Per-warehouse inventory lines, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InventoryLedger {
    lines: Vec<InventoryLine>,
}

fn require_location(storage_location: &str) -> DomainResult<String> {
    let trimmed = storage_location.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("storage location cannot be empty"));
    }
    Ok(trimmed.to_string())
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of quantities of every line held by `warehouse_id`.
    pub fn load_of(&self, warehouse_id: WarehouseId) -> i64 {
        self.lines_for_warehouse(warehouse_id).map(|l| l.quantity).sum()
    }

    /// Units of `product_id` held across every warehouse.
    pub fn total_for_product(&self, product_id: ProductId) -> i64 {
        self.lines
            .iter()
            .filter(|l| l.product_id() == product_id)
            .map(|l| l.quantity)
            .sum()
    }

    pub fn references_warehouse(&self, warehouse_id: WarehouseId) -> bool {
        self.lines.iter().any(|l| l.warehouse_id == warehouse_id)
    }

    /// Lines held by `warehouse_id`. The iterator is lazy and `Clone`, so it
    /// can be restarted without touching the ledger again.
    pub fn lines_for_warehouse(
        &self,
        warehouse_id: WarehouseId,
    ) -> impl Iterator<Item = &InventoryLine> + Clone + '_ {
        self.lines.iter().filter(move |l| l.warehouse_id == warehouse_id)
    }

    /// Case-insensitive substring search over a warehouse's lines.
    ///
    /// A blank query matches every line of the warehouse.
    pub fn search(
        &self,
        warehouse_id: WarehouseId,
        by: LineSearch,
        query: &str,
    ) -> impl Iterator<Item = &InventoryLine> + Clone + '_ {
        let needle = fold_case(query);
        self.lines_for_warehouse(warehouse_id).filter(move |l| {
            if needle.is_empty() {
                return true;
            }
            let haystack = match by {
                LineSearch::ProductName => l.product.name(),
                LineSearch::Sku => l.product.sku(),
            };
            fold_case(haystack).contains(&needle)
        })
    }

    pub fn get(&self, line_id: InventoryLineId) -> DomainResult<&InventoryLine> {
        self.lines
            .iter()
            .find(|l| l.id == line_id)
            .ok_or_else(|| DomainError::not_found(format!("inventory line {line_id}")))
    }

    /// Run every check for adding stock without touching the ledger.
    pub fn prepare_add(
        &self,
        registry: &WarehouseRegistry,
        warehouse_id: WarehouseId,
        quantity: i64,
        storage_location: &str,
    ) -> DomainResult<PendingLine> {
        registry.get(warehouse_id)?;

        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        let storage_location = require_location(storage_location)?;

        let remaining = registry.remaining_capacity(warehouse_id, self)?;
        if quantity > remaining {
            return Err(DomainError::capacity_exceeded(format!(
                "warehouse {warehouse_id} has room for {remaining} more units, requested {quantity}"
            )));
        }

        Ok(PendingLine {
            warehouse_id,
            quantity,
            storage_location,
        })
    }

    /// Insert a prepared line. Infallible: all checks ran in `prepare_add`.
    pub fn insert(&mut self, pending: PendingLine, product: Product) -> InventoryLine {
        let line = InventoryLine {
            id: InventoryLineId::new(),
            warehouse_id: pending.warehouse_id,
            product,
            quantity: pending.quantity,
            storage_location: pending.storage_location,
        };
        self.lines.push(line.clone());
        line
    }

    /// Add a new line of `product` to a warehouse (never merges).
    pub fn add_line(
        &mut self,
        registry: &WarehouseRegistry,
        warehouse_id: WarehouseId,
        product: Product,
        quantity: i64,
        storage_location: &str,
    ) -> DomainResult<InventoryLine> {
        let pending = self.prepare_add(registry, warehouse_id, quantity, storage_location)?;
        Ok(self.insert(pending, product))
    }

    /// Set a line's quantity and storage location.
    pub fn update_line(
        &mut self,
        registry: &WarehouseRegistry,
        line_id: InventoryLineId,
        quantity: i64,
        storage_location: &str,
    ) -> DomainResult<InventoryLine> {
        let idx = self.index_of(line_id)?;

        if quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        let storage_location = require_location(storage_location)?;

        let current = &self.lines[idx];
        let warehouse = registry.get(current.warehouse_id)?;
        let load_without_line = self.load_of(current.warehouse_id) - current.quantity;
        let room = warehouse.max_capacity() - load_without_line;
        if quantity > room {
            return Err(DomainError::capacity_exceeded(format!(
                "warehouse {} has room for {room} units on this line, requested {quantity}",
                current.warehouse_id
            )));
        }

        let line = &mut self.lines[idx];
        line.quantity = quantity;
        line.storage_location = storage_location;
        Ok(line.clone())
    }

    pub fn remove_line(&mut self, line_id: InventoryLineId) -> DomainResult<InventoryLine> {
        let idx = self.index_of(line_id)?;
        Ok(self.lines.remove(idx))
    }

    pub(crate) fn index_of(&self, line_id: InventoryLineId) -> DomainResult<usize> {
        self.lines
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| DomainError::not_found(format!("inventory line {line_id}")))
    }

    pub(crate) fn line_at(&self, idx: usize) -> &InventoryLine {
        &self.lines[idx]
    }

    pub(crate) fn line_mut(&mut self, idx: usize) -> &mut InventoryLine {
        &mut self.lines[idx]
    }

    pub(crate) fn push(&mut self, line: InventoryLine) {
        self.lines.push(line);
    }

    pub(crate) fn new_line(
        warehouse_id: WarehouseId,
        product: Product,
        quantity: i64,
        storage_location: String,
    ) -> InventoryLine {
        InventoryLine {
            id: InventoryLineId::new(),
            warehouse_id,
            product,
            quantity,
            storage_location,
        }
    }
}

impl InventoryLine {
    pub(crate) fn rehome(&mut self, warehouse_id: WarehouseId) {
        self.warehouse_id = warehouse_id;
    }

    pub(crate) fn add_quantity(&mut self, delta: i64) {
        self.quantity += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warehouse::WarehouseDraft;
    use stockyard_products::{DepartmentCatalog, ProductCatalog, ProductDraft};

    fn product(sku: &str, name: &str) -> Product {
        let mut catalog = ProductCatalog::new();
        catalog
            .find_or_create(
                &ProductDraft {
                    sku: sku.to_string(),
                    name: name.to_string(),
                    description: None,
                    category: "PRODUCE".to_string(),
                },
                &DepartmentCatalog::default(),
            )
            .unwrap()
            .0
    }

    fn warehouse(registry: &mut WarehouseRegistry, max_capacity: i64) -> WarehouseId {
        registry
            .create(&WarehouseDraft {
                name: "A".to_string(),
                location: "Austin".to_string(),
                max_capacity,
            })
            .unwrap()
            .id()
    }

    #[test]
    fn add_line_over_capacity_leaves_ledger_unchanged() {
        let mut registry = WarehouseRegistry::new();
        let mut ledger = InventoryLedger::new();
        let a = warehouse(&mut registry, 100);
        ledger.add_line(&registry, a, product("APL", "Apple"), 90, "A0").unwrap();

        let err = ledger
            .add_line(&registry, a, product("X", "Product X"), 20, "A1")
            .unwrap_err();
        assert!(matches!(err, DomainError::CapacityExceeded(_)));
        assert_eq!(ledger.load_of(a), 90);
        assert_eq!(ledger.lines_for_warehouse(a).count(), 1);
    }

    #[test]
    fn add_line_validates_quantity_and_location() {
        let mut registry = WarehouseRegistry::new();
        let mut ledger = InventoryLedger::new();
        let a = warehouse(&mut registry, 100);

        for qty in [0, -5] {
            let err = ledger.add_line(&registry, a, product("APL", "Apple"), qty, "A1").unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
        let err = ledger.add_line(&registry, a, product("APL", "Apple"), 5, "  ").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = ledger
            .add_line(&registry, WarehouseId::new(), product("APL", "Apple"), 5, "A1")
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn add_line_never_merges_same_product() {
        let mut registry = WarehouseRegistry::new();
        let mut ledger = InventoryLedger::new();
        let a = warehouse(&mut registry, 100);
        let apple = product("APL", "Apple");

        let first = ledger.add_line(&registry, a, apple.clone(), 10, "A1").unwrap();
        let second = ledger.add_line(&registry, a, apple, 10, "A2").unwrap();
        assert_ne!(first.id(), second.id());
        assert_eq!(ledger.load_of(a), 20);
    }

    #[test]
    fn update_line_checks_capacity_against_delta() {
        let mut registry = WarehouseRegistry::new();
        let mut ledger = InventoryLedger::new();
        let a = warehouse(&mut registry, 100);
        let line = ledger.add_line(&registry, a, product("APL", "Apple"), 40, "A1").unwrap();
        ledger.add_line(&registry, a, product("PEA", "Pear"), 50, "A2").unwrap();

        // 50 other + 50 = 100: exactly full is fine.
        let updated = ledger.update_line(&registry, line.id(), 50, " B7 ").unwrap();
        assert_eq!(updated.quantity(), 50);
        assert_eq!(updated.storage_location(), "B7");

        let err = ledger.update_line(&registry, line.id(), 51, "B7").unwrap_err();
        assert!(matches!(err, DomainError::CapacityExceeded(_)));
        assert_eq!(ledger.load_of(a), 100);
    }

    #[test]
    fn update_line_allows_zero_and_rejects_negative() {
        let mut registry = WarehouseRegistry::new();
        let mut ledger = InventoryLedger::new();
        let a = warehouse(&mut registry, 100);
        let line = ledger.add_line(&registry, a, product("APL", "Apple"), 40, "A1").unwrap();

        assert_eq!(ledger.update_line(&registry, line.id(), 0, "A1").unwrap().quantity(), 0);
        assert!(matches!(
            ledger.update_line(&registry, line.id(), -1, "A1"),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            ledger.update_line(&registry, line.id(), 1, ""),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            ledger.update_line(&registry, InventoryLineId::new(), 1, "A1"),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn remove_line_frees_capacity() {
        let mut registry = WarehouseRegistry::new();
        let mut ledger = InventoryLedger::new();
        let a = warehouse(&mut registry, 10);
        let line = ledger.add_line(&registry, a, product("APL", "Apple"), 10, "A1").unwrap();

        ledger.remove_line(line.id()).unwrap();
        assert_eq!(registry.remaining_capacity(a, &ledger).unwrap(), 10);
        assert!(matches!(ledger.remove_line(line.id()), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn lines_for_warehouse_is_restartable_and_ordered() {
        let mut registry = WarehouseRegistry::new();
        let mut ledger = InventoryLedger::new();
        let a = warehouse(&mut registry, 100);
        let b = warehouse(&mut registry, 100);
        let l1 = ledger.add_line(&registry, a, product("APL", "Apple"), 1, "A1").unwrap();
        ledger.add_line(&registry, b, product("PEA", "Pear"), 1, "B1").unwrap();
        let l3 = ledger.add_line(&registry, a, product("FIG", "Fig"), 1, "A2").unwrap();

        let iter = ledger.lines_for_warehouse(a);
        let first: Vec<_> = iter.clone().map(|l| l.id()).collect();
        let second: Vec<_> = iter.map(|l| l.id()).collect();
        assert_eq!(first, vec![l1.id(), l3.id()]);
        assert_eq!(first, second);
    }

    #[test]
    fn search_by_name_and_sku() {
        let mut registry = WarehouseRegistry::new();
        let mut ledger = InventoryLedger::new();
        let a = warehouse(&mut registry, 100);
        ledger.add_line(&registry, a, product("APL-RED", "Red Apple"), 1, "A1").unwrap();
        ledger.add_line(&registry, a, product("PEA-01", "Pear"), 1, "A2").unwrap();

        assert_eq!(ledger.search(a, LineSearch::ProductName, "apple").count(), 1);
        assert_eq!(ledger.search(a, LineSearch::Sku, "pea").count(), 1);
        assert_eq!(ledger.search(a, LineSearch::Sku, "zzz").count(), 0);
        assert_eq!(ledger.search(a, LineSearch::ProductName, "  ").count(), 2);
    }

    #[test]
    fn search_folds_case_like_sku_matching() {
        let mut registry = WarehouseRegistry::new();
        let mut ledger = InventoryLedger::new();
        let a = warehouse(&mut registry, 100);
        let tea = product("ÇAY-1", "Çay Demlik");
        ledger.add_line(&registry, a, tea.clone(), 1, "A1").unwrap();

        let hits: Vec<_> = ledger.search(a, LineSearch::Sku, "çay").collect();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].product().has_sku("çay-1"));
        assert!(tea.has_sku("çay-1"));
        assert_eq!(ledger.search(a, LineSearch::ProductName, "ÇAY DEM").count(), 1);
    }

    #[test]
    fn total_for_product_spans_warehouses() {
        let mut registry = WarehouseRegistry::new();
        let mut ledger = InventoryLedger::new();
        let a = warehouse(&mut registry, 100);
        let b = warehouse(&mut registry, 100);
        let apple = product("APL", "Apple");
        let pear = product("PEA", "Pear");

        ledger.add_line(&registry, a, apple.clone(), 10, "A1").unwrap();
        ledger.add_line(&registry, a, apple.clone(), 5, "A2").unwrap();
        ledger.add_line(&registry, b, apple.clone(), 7, "B1").unwrap();
        ledger.add_line(&registry, b, pear.clone(), 3, "B2").unwrap();

        assert_eq!(ledger.total_for_product(apple.id()), 22);
        assert_eq!(ledger.total_for_product(pear.id()), 3);
        assert_eq!(ledger.total_for_product(ProductId::new()), 0);
    }
}
