//! Products domain module.
//!
//! This crate contains the product catalog rules, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no locking).

pub mod catalog;
pub mod department;
pub mod product;

pub use catalog::{ProductCatalog, ProductResolution};
pub use department::{Department, DepartmentCatalog};
pub use product::{fold_case, Product, ProductDraft};
