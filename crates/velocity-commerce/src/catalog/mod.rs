//! Static product catalog.
//!
//! The catalog is read-only and keyed by product id. It is loaded once from a
//! JSON document with `plans`, `esims` and `accessories` sections; the cart
//! never queries it, callers hand products to the cart themselves.

mod filter;
mod icons;
mod product;

pub use filter::{CategoryCount, CategoryFilter, CATEGORY_TABS};
pub use icons::{image_icon, DEFAULT_ICON};
pub use product::Product;

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::CommerceError;
use crate::ids::ProductId;

const BUILTIN_CATALOG: &str = include_str!("../../data/products.json");

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    plans: Vec<Product>,
    #[serde(default)]
    esims: Vec<Product>,
    #[serde(default)]
    accessories: Vec<Product>,
}

/// Read-only product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from products, rejecting duplicate ids.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CommerceError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id.clone(), position).is_some() {
                return Err(CommerceError::CatalogError(format!(
                    "duplicate product id: {}",
                    product.id
                )));
            }
        }
        Ok(Self { products, index })
    }

    /// Parse a catalog document.
    pub fn from_json_str(json: &str) -> Result<Self, CommerceError> {
        let doc: CatalogDocument = serde_json::from_str(json)
            .map_err(|e| CommerceError::CatalogError(format!("invalid catalog: {}", e)))?;
        let products = doc
            .plans
            .into_iter()
            .chain(doc.esims)
            .chain(doc.accessories)
            .collect();
        Self::from_products(products)
    }

    /// Load a catalog document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CommerceError::CatalogError(format!("failed to read {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), products = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    /// The catalog bundled with the crate.
    pub fn builtin() -> Result<Self, CommerceError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// Every product: plans, then eSIMs, then accessories.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).and_then(|&i| self.products.get(i))
    }

    /// Look up a product by id, failing with `ProductNotFound`.
    pub fn require(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.get(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Products passing `filter`, in catalog order.
    pub fn filter<'a>(&'a self, filter: &'a CategoryFilter) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(move |p| filter.matches(p))
    }

    /// The category tabs with their product counts.
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        CATEGORY_TABS
            .iter()
            .map(|&(id, name)| {
                let filter: CategoryFilter = id.parse().unwrap_or_default();
                CategoryCount {
                    id,
                    name,
                    count: self.filter(&filter).count(),
                }
            })
            .collect()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
