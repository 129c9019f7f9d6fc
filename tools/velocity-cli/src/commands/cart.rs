//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use serde_json::json;
use velocity_cache::FileStore;
use velocity_commerce::prelude::*;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::{format_price, Output};

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_cart()?;
    store.subscribe(Box::new(ToastObserver::new(ctx.output.clone())));

    match args.command {
        CartCommand::Show => show_cart(&store, ctx),
        CartCommand::Add { id } => add_item(&mut store, &id, ctx),
        CartCommand::Remove { id } => {
            let id = ProductId::new(id);
            if !store.remove_item(&id) {
                ctx.output.warn(&format!("{} is not in the cart", id));
            }
            print_state(&store, ctx);
            Ok(())
        }
        CartCommand::Set { id, quantity } => {
            let id = ProductId::new(id);
            if !store.set_quantity(&id, quantity) {
                ctx.output.warn(&format!("{} is not in the cart", id));
            }
            print_state(&store, ctx);
            Ok(())
        }
        CartCommand::Inc { id } => step_quantity(&mut store, &id, 1, ctx),
        CartCommand::Dec { id } => step_quantity(&mut store, &id, -1, ctx),
        CartCommand::Clear { yes } => clear_cart(&mut store, yes, ctx),
        CartCommand::Count => {
            if ctx.output.is_json() {
                ctx.output.json(&json!({ "count": store.item_count() }));
            } else {
                println!("{}", store.item_count());
            }
            Ok(())
        }
    }
}

fn add_item(store: &mut CartStore<FileStore>, id: &str, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let product = catalog.require(&ProductId::new(id))?;

    let quantity = store.add_item(LineItemInput::from(product))?;
    ctx.output
        .debug(&format!("{} now has quantity {}", product.id, quantity));

    print_state(store, ctx);
    Ok(())
}

fn step_quantity(
    store: &mut CartStore<FileStore>,
    id: &str,
    delta: i64,
    ctx: &Context,
) -> Result<()> {
    let id = ProductId::new(id);
    let Some(line) = store.get(&id) else {
        bail!("{} is not in the cart", id);
    };

    let quantity = i64::from(line.quantity) + delta;
    store.set_quantity(&id, quantity);

    print_state(store, ctx);
    Ok(())
}

fn clear_cart(store: &mut CartStore<FileStore>, yes: bool, ctx: &Context) -> Result<()> {
    if !yes && !store.is_empty() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} items from the cart?", store.item_count()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Clear cancelled");
            return Ok(());
        }
    }

    store.clear();
    print_state(store, ctx);
    Ok(())
}

fn show_cart(store: &CartStore<FileStore>, ctx: &Context) -> Result<()> {
    let policy = ctx.tax_policy()?;
    let summary = CartSummary::from_items(store.items(), &policy)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": store.items(),
            "itemCount": store.item_count(),
            "total": store.total(),
            "summary": summary,
        }));
        return Ok(());
    }

    ctx.output.header("Your Cart");
    if store.is_empty() {
        ctx.output.info("Your cart is empty");
        ctx.output
            .list_item("Browse plans with `velocity plans` and add one with `velocity cart add <id>`");
        return Ok(());
    }

    for item in store.items() {
        let price = format!("{}/{}", format_price(item.price, policy.currency), item.duration);
        let quantity = format!("x{}", item.quantity);
        let line_total = format_price(item.line_total(), policy.currency);
        ctx.output.table_row(
            &[
                item.icon(),
                item.name.as_str(),
                price.as_str(),
                quantity.as_str(),
                line_total.as_str(),
            ],
            &[2, 28, 16, 5, 10],
        );
    }

    ctx.output.info("");
    ctx.output.header("Order Summary");
    ctx.output.kv("Subtotal", &summary.subtotal.display());
    ctx.output.kv(
        &format!("Tax ({:.1}%)", policy.rate * 100.0),
        &summary.tax.display(),
    );
    ctx.output.kv("Total", &summary.total.display());

    Ok(())
}

/// After a mutation: the cart as JSON, or the badge line.
fn print_state(store: &CartStore<FileStore>, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": store.items(),
            "itemCount": store.item_count(),
            "total": store.total(),
            "persistWarning": store.last_persist_error().map(|e| e.to_string()),
        }));
        return;
    }

    let count = store.item_count();
    ctx.output.info(&format!(
        "Cart: {} item{}",
        count,
        if count == 1 { "" } else { "s" }
    ));
}

/// Prints a toast for each cart change, and the storage warning when a
/// write failed.
pub struct ToastObserver {
    output: Output,
}

impl ToastObserver {
    pub fn new(output: Output) -> Self {
        Self { output }
    }
}

impl CartObserver for ToastObserver {
    fn on_change(&mut self, change: &CartChange<'_>) {
        if let Some((title, detail)) = toast_for(change) {
            self.output.toast(title, &detail);
        }
        if let Some(err) = change.persist_warning {
            self.output.warn(&format!(
                "Could not save cart ({}); changes are kept for this session only",
                err
            ));
        }
    }
}

/// Toast title and description for a change, if it warrants one.
fn toast_for(change: &CartChange<'_>) -> Option<(&'static str, String)> {
    if !change.changed {
        return None;
    }

    match change.event {
        CartEvent::Added { id, .. } => {
            let name = change
                .items
                .iter()
                .find(|item| &item.id == id)
                .map_or(id.as_str(), |item| item.name.as_str());
            Some(("Added to Cart", format!("{} has been added to your cart.", name)))
        }
        CartEvent::Removed { .. } => Some((
            "Removed from Cart",
            "Item has been removed from your cart.".to_string(),
        )),
        CartEvent::Cleared { .. } => Some((
            "Cart Cleared",
            "All items have been removed from your cart.".to_string(),
        )),
        CartEvent::QuantityChanged { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, name: &str) -> CartLineItem {
        serde_json::from_value(json!({
            "id": id, "name": name, "price": 112, "duration": "12mo",
            "category": "gaming", "image": "gaming", "quantity": 1
        }))
        .unwrap()
    }

    #[test]
    fn test_added_toast_names_product() {
        let items = vec![line("gaming-1", "Gaming Pro")];
        let event = CartEvent::Added {
            id: ProductId::new("gaming-1"),
            quantity: 1,
        };
        let change = CartChange {
            event: &event,
            changed: true,
            items: &items,
            persist_warning: None,
        };

        let (title, detail) = toast_for(&change).unwrap();
        assert_eq!(title, "Added to Cart");
        assert_eq!(detail, "Gaming Pro has been added to your cart.");
    }

    #[test]
    fn test_noop_has_no_toast() {
        let event = CartEvent::Removed {
            id: ProductId::new("missing"),
            item: None,
        };
        let change = CartChange {
            event: &event,
            changed: false,
            items: &[],
            persist_warning: None,
        };

        assert!(toast_for(&change).is_none());
    }

    #[test]
    fn test_clear_toast() {
        let event = CartEvent::Cleared { removed: 2 };
        let change = CartChange {
            event: &event,
            changed: true,
            items: &[],
            persist_warning: None,
        };

        assert_eq!(toast_for(&change).unwrap().0, "Cart Cleared");
    }
}
