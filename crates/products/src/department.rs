//! Product categories (departments).
//!
//! The set of valid departments is owned outside the domain core and handed in
//! as a `DepartmentCatalog`; a `Department` is only obtainable by validating a
//! raw string against that catalog.

use serde::Serialize;

use stockyard_core::{DomainError, DomainResult, ValueObject};

use crate::product::fold_case;

/// Departments used by the store console when nothing else is configured.
pub const DEFAULT_DEPARTMENTS: &[&str] = &[
    "PRODUCE",
    "MEAT",
    "SEAFOOD",
    "DAIRY",
    "BAKERY",
    "DELI",
    "FROZEN",
    "GROCERY",
    "BEVERAGES",
    "HOUSEHOLD",
    "HEALTH_BEAUTY",
    "PHARMACY",
];

/// A validated department name (canonical spelling from the catalog).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Department(String);

impl Department {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Department {}

impl core::fmt::Display for Department {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Open-ended set of valid departments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentCatalog {
    names: Vec<String>,
}

impl DepartmentCatalog {
    /// Build a catalog from raw names.
    ///
    /// Names are trimmed and upper-cased; blanks and duplicates are dropped.
    /// Fails if nothing usable remains.
    pub fn new<I, S>(names: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for raw in names {
            let name = raw.as_ref().trim().to_uppercase();
            if name.is_empty() || out.contains(&name) {
                continue;
            }
            out.push(name);
        }

        if out.is_empty() {
            return Err(DomainError::validation("department catalog cannot be empty"));
        }

        Ok(Self { names: out })
    }

    /// Validate a raw category (case-insensitive) into a `Department`.
    pub fn parse(&self, raw: &str) -> DomainResult<Department> {
        let wanted = raw.trim();
        if wanted.is_empty() {
            return Err(DomainError::validation("category is required"));
        }

        let key = fold_case(wanted);
        self.names
            .iter()
            .find(|n| fold_case(n) == key)
            .map(|n| Department(n.clone()))
            .ok_or_else(|| DomainError::validation(format!("unknown category: {wanted}")))
    }

    /// All department names, in configured order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for DepartmentCatalog {
    fn default() -> Self {
        Self {
            names: DEFAULT_DEPARTMENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
