//! Cart line items and the validated add-to-cart input.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// One product in the cart with its quantity.
///
/// Everything except `quantity` is a snapshot taken when the product was
/// first added; later catalog changes do not touch it. Serialized with
/// exactly these attribute names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    /// Product id, unique within the cart.
    pub id: ProductId,
    /// Product name at add time.
    pub name: String,
    /// Unit price at add time.
    pub price: f64,
    /// Billing period label at add time.
    pub duration: String,
    /// Category at add time.
    pub category: String,
    /// Image key at add time.
    pub image: String,
    /// Number of units, always at least 1.
    pub quantity: u32,
}

impl CartLineItem {
    pub(crate) fn from_input(input: LineItemInput) -> Self {
        Self {
            id: input.id,
            name: input.name,
            price: input.price,
            duration: input.duration,
            category: input.category,
            image: input.image,
            quantity: 1,
        }
    }

    /// `price * quantity`, unrounded.
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// Icon glyph for the snapshotted image key.
    pub fn icon(&self) -> &'static str {
        crate::catalog::image_icon(&self.image)
    }
}

/// The fields `add_item` needs from a product.
///
/// Deserializing from loosely-typed JSON fails when any field is missing;
/// extra display-only fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemInput {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub duration: String,
    pub category: String,
    pub image: String,
}

impl LineItemInput {
    /// Check the values a line item cannot do without.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.id.as_str().trim().is_empty() {
            return Err(CommerceError::invalid("id", "must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(CommerceError::invalid("name", "must not be empty"));
        }
        if !self.price.is_finite() {
            return Err(CommerceError::invalid("price", "must be a finite number"));
        }
        if self.price < 0.0 {
            return Err(CommerceError::invalid(
                "price",
                format!("must not be negative, got {}", self.price),
            ));
        }
        Ok(())
    }

    /// Parse a product-shaped JSON value.
    pub fn from_json(value: serde_json::Value) -> Result<Self, CommerceError> {
        let input: Self = serde_json::from_value(value)
            .map_err(|e| CommerceError::invalid("product", e.to_string()))?;
        input.validate()?;
        Ok(input)
    }
}

impl From<&Product> for LineItemInput {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            duration: product.duration.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input() -> LineItemInput {
        LineItemInput {
            id: ProductId::new("gaming-1"),
            name: "Gaming Pro".into(),
            price: 112.0,
            duration: "12mo".into(),
            category: "gaming".into(),
            image: "gaming".into(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_input() {
        assert!(input().validate().is_ok());
        let mut free = input();
        free.price = 0.0;
        assert!(free.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let mut i = input();
        i.id = ProductId::new("  ");
        assert!(matches!(
            i.validate(),
            Err(CommerceError::InvalidProduct { field: "id", .. })
        ));

        let mut i = input();
        i.name = String::new();
        assert!(matches!(
            i.validate(),
            Err(CommerceError::InvalidProduct { field: "name", .. })
        ));

        for price in [f64::NAN, f64::INFINITY, -1.0] {
            let mut i = input();
            i.price = price;
            assert!(matches!(
                i.validate(),
                Err(CommerceError::InvalidProduct { field: "price", .. })
            ));
        }
    }

    #[test]
    fn test_from_json_requires_all_fields() {
        let missing_duration = json!({
            "id": "gaming-1",
            "name": "Gaming Pro",
            "price": 112,
            "category": "gaming",
            "image": "gaming"
        });
        let err = LineItemInput::from_json(missing_duration).unwrap_err();
        assert!(err.to_string().contains("duration"));
    }

    #[test]
    fn test_from_json_ignores_display_fields() {
        let value = json!({
            "id": "gaming-1",
            "name": "Gaming Pro",
            "price": 112,
            "originalPrice": 140,
            "duration": "12mo",
            "category": "gaming",
            "image": "gaming",
            "features": ["Unlimited"],
            "popular": true
        });
        assert_eq!(LineItemInput::from_json(value).unwrap(), input());
    }

    #[test]
    fn test_line_item_serializes_exact_attribute_names() {
        let item = CartLineItem::from_input(input());
        let value = serde_json::to_value(&item).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["category", "duration", "id", "image", "name", "price", "quantity"]
        );
        assert_eq!(value["quantity"], 1);
        assert_eq!(value["id"], "gaming-1");
    }

    #[test]
    fn test_line_total() {
        let mut item = CartLineItem::from_input(input());
        item.quantity = 3;
        assert_eq!(item.line_total(), 336.0);
    }
}
