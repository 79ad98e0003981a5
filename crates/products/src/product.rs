use serde::{Deserialize, Serialize};

use stockyard_core::{DomainError, DomainResult, Entity, ProductId};

use crate::department::{Department, DepartmentCatalog};

/// Folded form used for every case-insensitive match on SKUs, names and
/// department labels.
pub fn fold_case(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Catalog product. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    sku: String,
    name: String,
    category: Department,
    description: Option<String>,
}

impl Product {
    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &Department {
        &self.category
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// SKUs compare case-insensitively after trimming.
    pub fn has_sku(&self, sku: &str) -> bool {
        fold_case(&self.sku) == fold_case(sku)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Unvalidated product input, as received from a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
}

impl ProductDraft {
    /// Validate the draft and build a product with the given identifier.
    pub fn validate(&self, id: ProductId, departments: &DepartmentCatalog) -> DomainResult<Product> {
        let sku = self.sku.trim();
        if sku.is_empty() {
            return Err(DomainError::validation("SKU is required"));
        }

        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("product name is required"));
        }

        let category = departments.parse(&self.category)?;

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(Product {
            id,
            sku: sku.to_string(),
            name: name.to_string(),
            category,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(sku: &str, name: &str, category: &str) -> ProductDraft {
        ProductDraft {
            sku: sku.to_string(),
            name: name.to_string(),
            description: Some("  ".to_string()),
            category: category.to_string(),
        }
    }

    #[test]
    fn validate_trims_and_canonicalizes() {
        let id = ProductId::new();
        let product = draft(" MILK-1 ", " Whole Milk ", "dairy")
            .validate(id, &DepartmentCatalog::default())
            .unwrap();

        assert_eq!(product.id(), id);
        assert_eq!(product.sku(), "MILK-1");
        assert_eq!(product.name(), "Whole Milk");
        assert_eq!(product.category().as_str(), "DAIRY");
        assert_eq!(product.description(), None);
        assert!(product.has_sku("milk-1"));
    }

    #[test]
    fn has_sku_folds_non_ascii() {
        let product = draft("ÇAY-1", "Çay", "BEVERAGES")
            .validate(ProductId::new(), &DepartmentCatalog::default())
            .unwrap();
        assert!(product.has_sku(" çay-1 "));
        assert!(!product.has_sku("CAY-1"));
    }

    #[test]
    fn validate_rejects_blank_sku() {
        let err = draft("  ", "Milk", "DAIRY")
            .validate(ProductId::new(), &DepartmentCatalog::default())
            .unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for empty SKU"),
        }
    }

    #[test]
    fn validate_rejects_blank_name() {
        let err = draft("MILK-1", " ", "DAIRY")
            .validate(ProductId::new(), &DepartmentCatalog::default())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn validate_rejects_unknown_category() {
        let err = draft("MILK-1", "Milk", "AUTOMOTIVE")
            .validate(ProductId::new(), &DepartmentCatalog::default())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
