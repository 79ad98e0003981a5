//! Inventory domain module.
//!
//! - `warehouse`: warehouse records and their capacity ceilings (registry)
//! - `ledger`: inventory lines per warehouse and aggregate load
//! - `transfer`: all-or-nothing movement of stock between warehouses
//! - `store`: the single owner that serializes every mutation
//!
//! Everything except `store` is deterministic domain logic (no IO, no locking).

pub mod ledger;
pub mod store;
pub mod transfer;
pub mod warehouse;

pub use ledger::{InventoryLedger, InventoryLine, LineSearch, PendingLine};
pub use store::{AddStock, InventoryStore};
pub use transfer::{TransferKind, TransferOutcome, TransferRequest};
pub use warehouse::{Warehouse, WarehouseDraft, WarehouseRegistry};
