//! Fixture validation command.
//!
//! Loads a fixture file and reports every invariant violation, not just the
//! first, so a broken catalog can be fixed in one pass.

use std::path::Path;

use nanasu_storefront::catalog::{CatalogData, CatalogError};
use serde::Serialize;

use super::{CliError, print_json};

/// Summary printed by `validate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid: bool,
    pub products: usize,
    pub categories: usize,
    pub sellers: usize,
    pub violations: Vec<String>,
}

impl ValidationReport {
    #[must_use]
    pub fn new(data: &CatalogData) -> Self {
        let violations: Vec<String> = data.violations().iter().map(ToString::to_string).collect();

        Self {
            valid: violations.is_empty(),
            products: data.products.len(),
            categories: data.categories.len(),
            sellers: data.sellers.len(),
            violations,
        }
    }
}

/// Validate a fixture file and print the report.
///
/// Returns `Ok(false)` when the file parses but breaks an invariant.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not catalog JSON.
pub fn run(path: &Path) -> Result<bool, CliError> {
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let data = CatalogData::from_json(&json)?;

    let report = ValidationReport::new(&data);
    if !report.valid {
        tracing::warn!(
            path = %path.display(),
            violations = report.violations.len(),
            "Fixture has invariant violations"
        );
    }

    print_json(&report)?;
    Ok(report.valid)
}
