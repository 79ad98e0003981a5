//! Runtime configuration from environment variables.
//!
//! | variable | default |
//! |----------|---------|
//! | `STOCKYARD_BIND_ADDR` | `0.0.0.0:8080` |
//! | `STOCKYARD_DEPARTMENTS` | built-in grocery departments |
//! | `STOCKYARD_LOG_FORMAT` | `json` |
//!
//! Invalid values are logged and replaced by the default.

use std::net::SocketAddr;

use thiserror::Error;

use stockyard_observability::LogFormat;
use stockyard_products::DepartmentCatalog;

pub const BIND_ADDR_VAR: &str = "STOCKYARD_BIND_ADDR";
pub const DEPARTMENTS_VAR: &str = "STOCKYARD_DEPARTMENTS";
pub const LOG_FORMAT_VAR: &str = "STOCKYARD_LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid socket address {value:?}")]
    BindAddr { var: &'static str, value: String },

    #[error("{var}: {reason}")]
    Departments { var: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub departments: DepartmentCatalog,
}

impl ApiConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to
    /// defaults (with a warning) for missing or invalid values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bind_addr = match lookup(BIND_ADDR_VAR) {
            Some(raw) => parse_bind_addr(&raw).unwrap_or_else(|e| {
                tracing::warn!("{e}; using {DEFAULT_BIND_ADDR}");
                default_bind_addr()
            }),
            None => default_bind_addr(),
        };

        let departments = match lookup(DEPARTMENTS_VAR) {
            Some(raw) => parse_departments(&raw).unwrap_or_else(|e| {
                tracing::warn!("{e}; using built-in departments");
                DepartmentCatalog::default()
            }),
            None => DepartmentCatalog::default(),
        };

        Self {
            bind_addr,
            departments,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Log format is read on its own, before logging is initialized.
pub fn log_format_from_env() -> LogFormat {
    log_format_from_lookup(|key| std::env::var(key).ok())
}

/// Missing or unknown values select the default format. Nothing is logged,
/// since no subscriber exists yet.
pub fn log_format_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> LogFormat {
    lookup(LOG_FORMAT_VAR)
        .and_then(|raw| LogFormat::parse(&raw))
        .unwrap_or_default()
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

pub fn parse_bind_addr(raw: &str) -> Result<SocketAddr, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::BindAddr {
        var: BIND_ADDR_VAR,
        value: raw.to_string(),
    })
}

pub fn parse_departments(raw: &str) -> Result<DepartmentCatalog, ConfigError> {
    DepartmentCatalog::new(raw.split(',')).map_err(|e| ConfigError::Departments {
        var: DEPARTMENTS_VAR,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ApiConfig::default();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.departments, DepartmentCatalog::default());
    }

    #[test]
    fn reads_overrides() {
        let config = ApiConfig::from_lookup(lookup(&[
            (BIND_ADDR_VAR, "127.0.0.1:9000"),
            (DEPARTMENTS_VAR, "toys, garden ,"),
        ]));
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.departments.names(), &["TOYS".to_string(), "GARDEN".to_string()]);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = ApiConfig::from_lookup(lookup(&[
            (BIND_ADDR_VAR, "not an address"),
            (DEPARTMENTS_VAR, " , ,"),
        ]));
        assert_eq!(config.bind_addr, default_bind_addr());
        assert_eq!(config.departments, DepartmentCatalog::default());
    }

    #[test]
    fn log_format_reads_the_same_lookup() {
        assert_eq!(log_format_from_lookup(lookup(&[])), LogFormat::Json);
        assert_eq!(
            log_format_from_lookup(lookup(&[(LOG_FORMAT_VAR, " Pretty ")])),
            LogFormat::Pretty
        );
        assert_eq!(
            log_format_from_lookup(lookup(&[(LOG_FORMAT_VAR, "xml")])),
            LogFormat::Json
        );
    }

    #[test]
    fn parse_errors_name_the_variable() {
        let err = parse_bind_addr("nope").unwrap_err();
        assert!(err.to_string().starts_with(BIND_ADDR_VAR));
        let err = parse_departments("").unwrap_err();
        assert!(matches!(err, ConfigError::Departments { .. }));
    }
}
