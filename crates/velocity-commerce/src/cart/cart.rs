//! The in-memory cart list.

use std::collections::HashSet;

use crate::cart::{CartLineItem, LineItemInput};
use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::Serialize;

/// Ordered list of line items, at most one per product id.
///
/// The list is private: every change goes through `add_item`,
/// `remove_item`, `set_quantity` or `clear`, which keep the uniqueness and
/// positive-quantity invariants.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from previously stored items.
    ///
    /// Returns an error if an id repeats or a quantity is zero.
    pub fn from_items(items: Vec<CartLineItem>) -> Result<Self, CommerceError> {
        {
            let mut seen = HashSet::with_capacity(items.len());
            for item in &items {
                if !seen.insert(&item.id) {
                    return Err(CommerceError::invalid(
                        "id",
                        format!("duplicate line item {}", item.id),
                    ));
                }
                if item.quantity == 0 {
                    return Err(CommerceError::invalid(
                        "quantity",
                        format!("line item {} has quantity 0", item.id),
                    ));
                }
            }
        }
        Ok(Self { items })
    }

    /// Add one unit of a product.
    ///
    /// An existing line keeps its snapshot and gains one unit (saturating at
    /// `u32::MAX`); otherwise a new line with quantity 1 is appended.
    /// Returns the line's resulting quantity.
    pub fn add_item(&mut self, input: LineItemInput) -> Result<u32, CommerceError> {
        input.validate()?;

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == input.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return Ok(existing.quantity);
        }

        self.items.push(CartLineItem::from_input(input));
        Ok(1)
    }

    /// Remove a line by product id, returning it if it was present.
    pub fn remove_item(&mut self, id: &ProductId) -> Option<CartLineItem> {
        let position = self.items.iter().position(|i| &i.id == id)?;
        Some(self.items.remove(position))
    }

    /// Set a line's quantity.
    ///
    /// A quantity of zero or less removes the line. Values above `u32::MAX`
    /// are clamped. Returns whether a line with `id` was affected.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(id).is_some();
        }

        match self.items.iter_mut().find(|i| &i.id == id) {
            Some(item) => {
                item.quantity = clamp_quantity(quantity);
                true
            }
            None => false,
        }
    }

    /// Remove every line, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        removed
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of `price * quantity` across all lines, unrounded.
    pub fn total(&self) -> f64 {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// The lines in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Get a line by product id.
    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consume the cart and return its lines.
    pub fn into_items(self) -> Vec<CartLineItem> {
        self.items
    }
}

/// Clamp a positive requested quantity into the stored range.
pub(crate) fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity).unwrap_or(u32::MAX)
}
