//! Product catalog: SKU-unique product records with find-or-create semantics.

use stockyard_core::{DomainError, DomainResult, ProductId};

use crate::department::DepartmentCatalog;
use crate::product::{Product, ProductDraft};

/// Outcome of resolving a draft against the catalog, before anything is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductResolution {
    /// A product with the same SKU already exists; it is reused unchanged.
    Existing(Product),
    /// No product with this SKU exists yet; `commit` will insert it.
    New(Product),
}

/// In-memory product catalog (insertion ordered).
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a draft and decide whether it maps to an existing product.
    ///
    /// Does not mutate the catalog, so callers can run further checks before
    /// committing.
    pub fn resolve(
        &self,
        draft: &ProductDraft,
        departments: &DepartmentCatalog,
    ) -> DomainResult<ProductResolution> {
        let candidate = draft.validate(ProductId::new(), departments)?;
        match self.by_sku(candidate.sku()) {
            Some(existing) => Ok(ProductResolution::Existing(existing.clone())),
            None => Ok(ProductResolution::New(candidate)),
        }
    }

    /// Store the product of a resolution (no-op for existing products).
    pub fn commit(&mut self, resolution: ProductResolution) -> Product {
        match resolution {
            ProductResolution::Existing(p) => p,
            ProductResolution::New(p) => {
                self.products.push(p.clone());
                p
            }
        }
    }

    /// Return the product with the draft's SKU, creating it if needed.
    pub fn find_or_create(
        &mut self,
        draft: &ProductDraft,
        departments: &DepartmentCatalog,
    ) -> DomainResult<(Product, bool)> {
        let resolution = self.resolve(draft, departments)?;
        let created = matches!(resolution, ProductResolution::New(_));
        Ok((self.commit(resolution), created))
    }

    pub fn get(&self, id: ProductId) -> DomainResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id_typed() == id)
            .ok_or_else(|| DomainError::not_found(format!("product {id}")))
    }

    pub fn by_sku(&self, sku: &str) -> Option<&Product> {
        let sku = sku.trim();
        if sku.is_empty() {
            return None;
        }
        self.products.iter().find(|p| p.has_sku(sku))
    }

    pub fn list(&self) -> &[Product] {
        &self.products
    }
}
