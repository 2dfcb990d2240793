//! Seed the live catalog from a YAML file.
//!
//! ```yaml
//! products:
//!   - id: r1
//!     slug: ethereal-halo-ring
//!     name: Ethereal Halo Ring
//!     category: rings
//!     price: 1890
//!     images: [/static/images/ring1.jpg]
//!     badge: Bestseller
//! ```

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info};

use aurelia_core::Product;
use aurelia_storefront::db::{self, ProductRepository};

/// Top-level layout of a seed file.
#[derive(Debug, Deserialize)]
pub struct SeedFile {
    pub products: Vec<Product>,
}

/// Check a seed file before touching the database.
///
/// Returns one message per problem; an empty list means the file is usable.
pub fn validate(seed: &SeedFile) -> Vec<String> {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();
    let mut slugs = HashSet::new();

    for product in &seed.products {
        let id = product.id.as_str();
        if id.trim().is_empty() {
            errors.push(format!("{}: empty id", product.name));
        }
        if !ids.insert(id) {
            errors.push(format!("{id}: duplicate id"));
        }
        if product.slug.trim().is_empty() {
            errors.push(format!("{id}: empty slug"));
        } else if !slugs.insert(product.slug.as_str()) {
            errors.push(format!("{id}: duplicate slug {}", product.slug));
        }
        if product.name.trim().is_empty() {
            errors.push(format!("{id}: empty name"));
        }
        if product.price <= Decimal::ZERO {
            errors.push(format!("{id}: price must be positive"));
        }
    }

    errors
}

/// Upsert every product in `file_path`.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the file cannot be read or
/// parsed, validation fails, or a database write fails.
pub async fn products(file_path: &str, clear_existing: bool) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url()?;

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading products from file");

    let content = tokio::fs::read_to_string(path).await?;
    let seed: SeedFile = serde_yaml::from_str(&content)?;

    info!(products = seed.products.len(), "Parsed seed file");

    let errors = validate(&seed);
    if !errors.is_empty() {
        error!("Seed file validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let repo = ProductRepository::new(&pool);

    if clear_existing {
        let removed = repo.delete_all().await?;
        info!(removed, "Cleared existing products");
    }

    for product in &seed.products {
        repo.upsert(product).await?;
    }

    info!("Seeding complete!");
    info!("  Products upserted: {}", seed.products.len());

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> SeedFile {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_bundled_seed_file_is_valid() {
        let seed = parse(include_str!("../../seed/products.yaml"));
        assert!(!seed.products.is_empty());
        assert_eq!(validate(&seed), Vec::<String>::new());
    }

    #[test]
    fn test_defaults_apply() {
        let seed = parse(
            "products:\n  - id: x1\n    slug: plain-band\n    name: Plain Band\n    category: rings\n    price: 450\n",
        );
        let product = &seed.products[0];
        assert!(product.in_stock);
        assert!(product.badge.is_none());
        assert!(product.images.is_empty());
    }

    #[test]
    fn test_duplicates_and_bad_prices_reported() {
        let seed = parse(
            r"
products:
  - id: x1
    slug: plain-band
    name: Plain Band
    category: rings
    price: 450
  - id: x1
    slug: plain-band
    name: Other Band
    category: rings
    price: 0
",
        );
        let errors = validate(&seed);
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e == "x1: duplicate id"));
        assert!(errors.iter().any(|e| e.contains("duplicate slug")));
        assert!(errors.iter().any(|e| e.contains("price must be positive")));
    }

    #[test]
    fn test_unknown_category_rejected() {
        let result: Result<SeedFile, _> = serde_yaml::from_str(
            "products:\n  - id: x1\n    slug: s\n    name: N\n    category: anklets\n    price: 10\n",
        );
        assert!(result.is_err());
    }
}
