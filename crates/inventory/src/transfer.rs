//! Transfer coordinator: move stock of one inventory line between warehouses.
//!
//! A transfer runs in two phases:
//!
//! ```text
//! TransferRequest
//!   ↓
//! 1. plan(): read-only; every precondition checked, first failure wins
//!   ↓
//! 2. apply(): re-resolves the planned lines, then mutates the ledger
//! ```
//!
//! Because nothing is written until the plan exists, a rejected transfer never
//! leaves a debited source without a credited destination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockyard_core::{DomainError, DomainResult, Entity, InventoryLineId, WarehouseId};

use crate::ledger::{InventoryLedger, InventoryLine};
use crate::warehouse::WarehouseRegistry;

/// Command: move `quantity` units of `line_id` from one warehouse to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub line_id: InventoryLineId,
    pub from_warehouse: WarehouseId,
    pub to_warehouse: WarehouseId,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// How the destination was credited.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferKind {
    /// The whole line moved; its identifier is preserved.
    Rehomed,
    /// Part of the line moved into an existing destination line of the same product.
    Merged,
    /// Part of the line moved into a newly created destination line.
    Split,
}

/// Validated, not-yet-applied transfer. Lines are named by id and looked
/// up again when the plan is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TransferPlan {
    Rehome {
        line_id: InventoryLineId,
        to: WarehouseId,
    },
    Merge {
        source_id: InventoryLineId,
        target_id: InventoryLineId,
        quantity: i64,
    },
    Split {
        source_id: InventoryLineId,
        to: WarehouseId,
        quantity: i64,
    },
}

/// Result of an applied transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferOutcome {
    pub kind: TransferKind,
    /// The source line after the transfer (absent when the line was re-homed).
    pub source: Option<InventoryLine>,
    pub destination: InventoryLine,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Check every precondition of `request` without mutating anything.
pub(crate) fn plan(
    registry: &WarehouseRegistry,
    ledger: &InventoryLedger,
    request: &TransferRequest,
) -> DomainResult<TransferPlan> {
    let source = ledger.get(request.line_id)?;
    if source.warehouse_id() != request.from_warehouse {
        return Err(DomainError::not_found(format!(
            "inventory line {} is not in warehouse {}",
            request.line_id, request.from_warehouse
        )));
    }

    if request.from_warehouse == request.to_warehouse {
        return Err(DomainError::validation(
            "source and destination warehouses must differ",
        ));
    }

    if request.quantity <= 0 {
        return Err(DomainError::validation("transfer quantity must be positive"));
    }

    if request.quantity > source.quantity() {
        return Err(DomainError::validation(format!(
            "cannot transfer {} units, line holds {}",
            request.quantity,
            source.quantity()
        )));
    }

    let remaining = registry.remaining_capacity(request.to_warehouse, ledger)?;
    if request.quantity > remaining {
        return Err(DomainError::capacity_exceeded(format!(
            "destination warehouse {} has room for {remaining} more units, requested {}",
            request.to_warehouse, request.quantity
        )));
    }

    if request.quantity == source.quantity() {
        return Ok(TransferPlan::Rehome {
            line_id: request.line_id,
            to: request.to_warehouse,
        });
    }

    let product_id = source.product_id();
    let target = ledger
        .lines_for_warehouse(request.to_warehouse)
        .find(|l| l.product_id() == product_id)
        .map(|l| l.id());

    Ok(match target {
        Some(target_id) => TransferPlan::Merge {
            source_id: request.line_id,
            target_id,
            quantity: request.quantity,
        },
        None => TransferPlan::Split {
            source_id: request.line_id,
            to: request.to_warehouse,
            quantity: request.quantity,
        },
    })
}

/// Apply a plan produced by `plan`.
///
/// Every line the plan names is resolved before anything is written, so a
/// plan that no longer matches the ledger fails without changing it.
pub(crate) fn apply(
    ledger: &mut InventoryLedger,
    plan: TransferPlan,
    occurred_at: DateTime<Utc>,
) -> DomainResult<TransferOutcome> {
    match plan {
        TransferPlan::Rehome { line_id, to } => {
            let idx = ledger.index_of(line_id)?;
            let line = ledger.line_mut(idx);
            let quantity = line.quantity();
            line.rehome(to);
            Ok(TransferOutcome {
                kind: TransferKind::Rehomed,
                source: None,
                destination: line.clone(),
                quantity,
                occurred_at,
            })
        }
        TransferPlan::Merge {
            source_id,
            target_id,
            quantity,
        } => {
            let source_idx = debitable(ledger, source_id, quantity)?;
            let target_idx = ledger.index_of(target_id)?;

            let source = ledger.line_mut(source_idx);
            source.add_quantity(-quantity);
            let source = source.clone();

            let target = ledger.line_mut(target_idx);
            target.add_quantity(quantity);
            Ok(TransferOutcome {
                kind: TransferKind::Merged,
                source: Some(source),
                destination: target.clone(),
                quantity,
                occurred_at,
            })
        }
        TransferPlan::Split {
            source_id,
            to,
            quantity,
        } => {
            let source_idx = debitable(ledger, source_id, quantity)?;

            let source = ledger.line_mut(source_idx);
            source.add_quantity(-quantity);
            let source = source.clone();

            let destination = InventoryLedger::new_line(
                to,
                source.product().clone(),
                quantity,
                source.storage_location().to_string(),
            );
            ledger.push(destination.clone());
            Ok(TransferOutcome {
                kind: TransferKind::Split,
                source: Some(source),
                destination,
                quantity,
                occurred_at,
            })
        }
    }
}

/// Position of `line_id`, provided it still holds at least `quantity` units.
fn debitable(ledger: &InventoryLedger, line_id: InventoryLineId, quantity: i64) -> DomainResult<usize> {
    let idx = ledger.index_of(line_id)?;
    let held = ledger.line_at(idx).quantity();
    if held < quantity {
        return Err(DomainError::conflict(format!(
            "inventory line {line_id} holds {held} units, transfer needs {quantity}"
        )));
    }
    Ok(idx)
}

/// Plan and apply in one step.
pub fn transfer(
    registry: &WarehouseRegistry,
    ledger: &mut InventoryLedger,
    request: &TransferRequest,
) -> DomainResult<TransferOutcome> {
    let plan = plan(registry, ledger, request)?;
    apply(ledger, plan, request.occurred_at)
}
