//! CLI command implementations.

pub mod query;
pub mod validate;

use nanasu_storefront::catalog::CatalogError;
use nanasu_storefront::config::ConfigError;
use serde::Serialize;
use thiserror::Error;

/// Errors that stop a command before it produces a result.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Output error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Print a value as pretty JSON on stdout.
#[allow(clippy::print_stdout)]
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
