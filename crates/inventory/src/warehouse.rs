use serde::{Deserialize, Serialize};

use stockyard_core::{DomainError, DomainResult, Entity, WarehouseId};

use crate::ledger::InventoryLedger;

/// A storage site with a maximum capacity (total units across all lines).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warehouse {
    id: WarehouseId,
    name: String,
    location: String,
    max_capacity: i64,
}

impl Warehouse {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn max_capacity(&self) -> i64 {
        self.max_capacity
    }
}

impl Entity for Warehouse {
    type Id = WarehouseId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Unvalidated warehouse input (create and full update).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseDraft {
    pub name: String,
    pub location: String,
    pub max_capacity: i64,
}

impl WarehouseDraft {
    fn validate(&self, id: WarehouseId) -> DomainResult<Warehouse> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("warehouse name cannot be empty"));
        }

        let location = self.location.trim();
        if location.is_empty() {
            return Err(DomainError::validation("warehouse location cannot be empty"));
        }

        if self.max_capacity < 0 {
            return Err(DomainError::validation("max capacity cannot be negative"));
        }

        Ok(Warehouse {
            id,
            name: name.to_string(),
            location: location.to_string(),
            max_capacity: self.max_capacity,
        })
    }
}

/// Owns warehouse records and their capacity ceilings.
///
/// Load figures come from the `InventoryLedger`; the registry never caches them.
#[derive(Debug, Clone, Default)]
pub struct WarehouseRegistry {
    warehouses: Vec<Warehouse>,
}

impl WarehouseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, draft: &WarehouseDraft) -> DomainResult<Warehouse> {
        let warehouse = draft.validate(WarehouseId::new())?;
        self.warehouses.push(warehouse.clone());
        Ok(warehouse)
    }

    /// Replace name, location and capacity.
    ///
    /// Capacity may not shrink below the stock already committed to the warehouse.
    pub fn update(
        &mut self,
        id: WarehouseId,
        draft: &WarehouseDraft,
        ledger: &InventoryLedger,
    ) -> DomainResult<Warehouse> {
        let idx = self.index_of(id)?;
        let updated = draft.validate(id)?;

        let load = ledger.load_of(id);
        if updated.max_capacity < load {
            return Err(DomainError::validation(format!(
                "max capacity {} is below current load {load}",
                updated.max_capacity
            )));
        }

        self.warehouses[idx] = updated.clone();
        Ok(updated)
    }

    pub fn delete(&mut self, id: WarehouseId, ledger: &InventoryLedger) -> DomainResult<Warehouse> {
        let idx = self.index_of(id)?;
        if ledger.references_warehouse(id) {
            return Err(DomainError::conflict(format!(
                "warehouse {id} still holds inventory lines"
            )));
        }
        Ok(self.warehouses.remove(idx))
    }

    pub fn get(&self, id: WarehouseId) -> DomainResult<&Warehouse> {
        self.warehouses
            .iter()
            .find(|w| w.id == id)
            .ok_or_else(|| DomainError::not_found(format!("warehouse {id}")))
    }

    pub fn list(&self) -> &[Warehouse] {
        &self.warehouses
    }

    pub fn current_load(&self, id: WarehouseId, ledger: &InventoryLedger) -> DomainResult<i64> {
        self.get(id)?;
        Ok(ledger.load_of(id))
    }

    pub fn remaining_capacity(&self, id: WarehouseId, ledger: &InventoryLedger) -> DomainResult<i64> {
        let warehouse = self.get(id)?;
        Ok((warehouse.max_capacity - ledger.load_of(id)).max(0))
    }

    fn index_of(&self, id: WarehouseId) -> DomainResult<usize> {
        self.warehouses
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| DomainError::not_found(format!("warehouse {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockyard_products::{DepartmentCatalog, ProductCatalog, ProductDraft};

    fn draft(name: &str, location: &str, max_capacity: i64) -> WarehouseDraft {
        WarehouseDraft {
            name: name.to_string(),
            location: location.to_string(),
            max_capacity,
        }
    }

    fn stock(registry: &WarehouseRegistry, ledger: &mut InventoryLedger, wid: WarehouseId, qty: i64) {
        let mut products = ProductCatalog::new();
        let (product, _) = products
            .find_or_create(
                &ProductDraft {
                    sku: "BEANS".to_string(),
                    name: "Beans".to_string(),
                    description: None,
                    category: "GROCERY".to_string(),
                },
                &DepartmentCatalog::default(),
            )
            .unwrap();
        ledger.add_line(registry, wid, product, qty, "A1").unwrap();
    }

    #[test]
    fn create_validates_fields() {
        let mut registry = WarehouseRegistry::new();
        assert!(matches!(registry.create(&draft(" ", "Austin", 10)), Err(DomainError::Validation(_))));
        assert!(matches!(registry.create(&draft("North", "", 10)), Err(DomainError::Validation(_))));
        assert!(matches!(registry.create(&draft("North", "Austin", -1)), Err(DomainError::Validation(_))));
        assert!(registry.list().is_empty());

        let w = registry.create(&draft(" North ", "Austin", 0)).unwrap();
        assert_eq!(w.name(), "North");
        assert_eq!(w.max_capacity(), 0);
    }

    #[test]
    fn update_unknown_is_not_found() {
        let mut registry = WarehouseRegistry::new();
        let ledger = InventoryLedger::new();
        let err = registry
            .update(WarehouseId::new(), &draft("North", "Austin", 10), &ledger)
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn update_cannot_shrink_below_load() {
        let mut registry = WarehouseRegistry::new();
        let mut ledger = InventoryLedger::new();
        let w = registry.create(&draft("North", "Austin", 100)).unwrap();
        stock(&registry, &mut ledger, w.id(), 60);

        let err = registry.update(w.id(), &draft("North", "Austin", 59), &ledger).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(registry.get(w.id()).unwrap().max_capacity(), 100);

        let updated = registry.update(w.id(), &draft("North 2", "Dallas", 60), &ledger).unwrap();
        assert_eq!(updated.name(), "North 2");
        assert_eq!(registry.remaining_capacity(w.id(), &ledger).unwrap(), 0);
    }

    #[test]
    fn delete_with_lines_conflicts_and_keeps_warehouse() {
        let mut registry = WarehouseRegistry::new();
        let mut ledger = InventoryLedger::new();
        let w = registry.create(&draft("North", "Austin", 100)).unwrap();
        stock(&registry, &mut ledger, w.id(), 1);

        let err = registry.delete(w.id(), &ledger).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert!(registry.get(w.id()).is_ok());
    }

    #[test]
    fn delete_empty_warehouse() {
        let mut registry = WarehouseRegistry::new();
        let ledger = InventoryLedger::new();
        let w = registry.create(&draft("North", "Austin", 100)).unwrap();
        registry.delete(w.id(), &ledger).unwrap();
        assert!(matches!(registry.get(w.id()), Err(DomainError::NotFound(_))));
        assert!(matches!(registry.delete(w.id(), &ledger), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn load_and_remaining_capacity() {
        let mut registry = WarehouseRegistry::new();
        let mut ledger = InventoryLedger::new();
        let w = registry.create(&draft("North", "Austin", 100)).unwrap();
        stock(&registry, &mut ledger, w.id(), 30);
        stock(&registry, &mut ledger, w.id(), 25);

        assert_eq!(registry.current_load(w.id(), &ledger).unwrap(), 55);
        assert_eq!(registry.remaining_capacity(w.id(), &ledger).unwrap(), 45);
        assert!(matches!(
            registry.current_load(WarehouseId::new(), &ledger),
            Err(DomainError::NotFound(_))
        ));
    }
}
