use anyhow::Context;
use std::env;

use business::domain::scan::catalog::RetailerCatalog;

const DEFAULT_CATALOG: &str = include_str!("../../resources/retailer_catalog.json");

/// Load the retailer code catalog
///
/// Environment variables:
/// - RETAILER_CATALOG_PATH: JSON catalog file (optional, bundled catalog otherwise)
///
/// # Errors
/// Returns error if the file cannot be read or is not a valid catalog
pub fn load_catalog() -> anyhow::Result<RetailerCatalog> {
    match env::var("RETAILER_CATALOG_PATH") {
        Ok(path) if !path.trim().is_empty() => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("cannot read retailer catalog {}", path))?;
            RetailerCatalog::from_json(&json)
                .with_context(|| format!("invalid retailer catalog {}", path))
        }
        _ => RetailerCatalog::from_json(DEFAULT_CATALOG).context("invalid bundled retailer catalog"),
    }
}
