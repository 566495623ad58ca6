//! Product catalog.
//!
//! The catalog is loaded once at startup, either from the JSON file named by
//! `STOREFRONT_CATALOG_PATH` or from the catalog embedded in the binary. It is
//! read-only afterwards and cheap to clone.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use hearthwood_core::{Product, ProductId};
use rust_decimal::Decimal;

/// Catalog shipped with the binary.
const EMBEDDED_CATALOG: &str = include_str!("../catalog/products.json");

/// Errors that can occur while loading the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate product id: {0}")]
    DuplicateId(ProductId),
    #[error("Negative price for product {0}")]
    NegativePrice(ProductId),
}

/// In-memory product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
    index: Arc<HashMap<ProductId, usize>>,
}

impl Catalog {
    /// Load the catalog from `path`, or the embedded catalog when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// products fail validation.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => {
                tracing::info!("Loading catalog from {:?}", path);
                let json = std::fs::read_to_string(path)?;
                Self::from_json(&json)
            }
            None => Self::embedded(),
        }
    }

    /// The catalog embedded in the binary.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded catalog is malformed.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Parse a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed JSON, duplicate ids or negative prices.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::from_products(products)
    }

    /// Build a catalog from already parsed products.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate ids or negative prices.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if product.price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice(product.id.clone()));
            }
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }

        let index = products
            .iter()
            .enumerate()
            .map(|(pos, product)| (product.id.clone(), pos))
            .collect();

        tracing::info!("Loaded {} catalog products", products.len());

        Ok(Self {
            products: Arc::new(products),
            index: Arc::new(index),
        })
    }

    /// All products in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).and_then(|pos| self.products.get(*pos))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
