//! Catalog product type.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A plan, eSIM or accessory offered in the storefront.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Current unit price.
    pub price: f64,
    /// Pre-discount price, shown struck through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    /// Billing period label (e.g., "12mo").
    pub duration: String,
    /// Category the plans page filters on.
    pub category: String,
    /// Marketing copy.
    #[serde(default)]
    pub description: String,
    /// Feature bullets.
    #[serde(default)]
    pub features: Vec<String>,
    /// Promotional badge text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer: Option<String>,
    /// Highlighted as "Most Popular".
    #[serde(default)]
    pub popular: bool,
    /// Image key used for icon lookup.
    pub image: String,
}

impl Product {
    /// Whether a higher original price is advertised.
    pub fn is_on_sale(&self) -> bool {
        self.original_price.map_or(false, |orig| orig > self.price)
    }

    /// The first `limit` features and how many more were left out.
    pub fn feature_preview(&self, limit: usize) -> (&[String], usize) {
        let shown = self.features.len().min(limit);
        (&self.features[..shown], self.features.len() - shown)
    }

    /// Icon glyph for this product's image key.
    pub fn icon(&self) -> &'static str {
        super::image_icon(&self.image)
    }
}
