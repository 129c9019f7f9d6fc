//! Order summary shown next to the cart.
//!
//! This is where rounding happens: each line and the subtotal are converted
//! to [`Money`], tax is applied to the subtotal, and the grand total is the
//! sum of the two.

use crate::cart::CartLineItem;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Default sales tax rate applied at checkout.
pub const DEFAULT_TAX_RATE: f64 = 0.08;

/// Tax and currency used to present the cart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxPolicy {
    /// Fraction of the subtotal charged as tax.
    pub rate: f64,
    /// Currency amounts are shown in.
    pub currency: Currency,
}

impl Default for TaxPolicy {
    fn default() -> Self {
        Self {
            rate: DEFAULT_TAX_RATE,
            currency: Currency::USD,
        }
    }
}

/// One row of the order summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryLine {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub line_total: Money,
}

/// Subtotal, tax and total for a cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSummary {
    pub lines: Vec<SummaryLine>,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl CartSummary {
    /// Summarize `items` under `policy`.
    pub fn from_items(items: &[CartLineItem], policy: &TaxPolicy) -> Result<Self, CommerceError> {
        let currency = policy.currency;
        let to_money = |amount: f64| Money::from_major(amount, currency).ok_or(CommerceError::Overflow);

        let lines = items
            .iter()
            .map(|item| {
                Ok(SummaryLine {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    quantity: item.quantity,
                    line_total: to_money(item.line_total())?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        let subtotal_major: f64 = items.iter().map(CartLineItem::line_total).sum();
        let subtotal = to_money(subtotal_major)?;
        let tax = to_money(subtotal.to_major() * policy.rate)?;
        let total = subtotal.try_add(&tax).ok_or(CommerceError::Overflow)?;

        Ok(Self {
            lines,
            subtotal,
            tax,
            total,
        })
    }

    /// Check if there is nothing to summarize.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, price: f64, quantity: u32) -> CartLineItem {
        CartLineItem {
            id: ProductId::new(id),
            name: id.to_uppercase(),
            price,
            duration: "month".into(),
            category: "gaming".into(),
            image: "gaming".into(),
            quantity,
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = CartSummary::from_items(&[], &TaxPolicy::default()).unwrap();
        assert!(summary.is_empty());
        assert!(summary.total.is_zero());
    }

    #[test]
    fn test_summary_with_tax() {
        let items = [line("gaming-1", 112.0, 2)];
        let summary = CartSummary::from_items(&items, &TaxPolicy::default()).unwrap();

        assert_eq!(summary.lines[0].line_total.amount_cents, 22400);
        assert_eq!(summary.subtotal.display(), "$224.00");
        assert_eq!(summary.tax.display(), "$17.92");
        assert_eq!(summary.total.display(), "$241.92");
    }

    #[test]
    fn test_summary_rounds_fractional_prices() {
        let items = [line("a", 19.99, 1), line("b", 5.0, 3)];
        let summary = CartSummary::from_items(&items, &TaxPolicy::default()).unwrap();
        assert_eq!(summary.subtotal.amount_cents, 3499);
        // 34.99 * 0.08 = 2.7992
        assert_eq!(summary.tax.amount_cents, 280);
        assert_eq!(summary.total.amount_cents, 3779);
    }

    #[test]
    fn test_custom_policy() {
        let items = [line("a", 10.0, 1)];
        let policy = TaxPolicy {
            rate: 0.0,
            currency: Currency::EUR,
        };
        let summary = CartSummary::from_items(&items, &policy).unwrap();
        assert_eq!(summary.total.display(), "\u{20ac}10.00");
    }
}
