//! Catalog browsing.

use anyhow::Result;
use console::style;
use velocity_commerce::prelude::*;

use super::{PlansArgs, PlansCommand};
use crate::context::Context;
use crate::output::{format_price, original_price, popular_badge};

/// Features listed per product before "+N more".
const FEATURE_PREVIEW: usize = 3;

/// Run the plans command.
pub fn run(args: PlansArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let currency = ctx.tax_policy()?.currency;

    match args.command.unwrap_or(PlansCommand::List) {
        PlansCommand::List => list_plans(&catalog, args.category.as_deref(), currency, ctx),
        PlansCommand::Categories => list_categories(&catalog, ctx),
        PlansCommand::Show { id } => show_plan(&catalog, &id, currency, ctx),
    }
}

fn list_plans(
    catalog: &Catalog,
    category: Option<&str>,
    currency: Currency,
    ctx: &Context,
) -> Result<()> {
    let filter: CategoryFilter = match category {
        Some(name) => name.parse().unwrap_or_default(),
        None => CategoryFilter::All,
    };
    let products: Vec<&Product> = catalog.filter(&filter).collect();

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&filter.label());
    ctx.output.info(&format!(
        "Showing {} plan{}",
        products.len(),
        if products.len() == 1 { "" } else { "s" }
    ));

    for product in products {
        print_product(product, currency);
    }

    Ok(())
}

fn print_product(product: &Product, currency: Currency) {
    let mut price = format!(
        "{}/{}",
        style(format_price(product.price, currency)).bold(),
        product.duration
    );
    if let Some(orig) = product.original_price.filter(|_| product.is_on_sale()) {
        price.push_str(&format!(" {}", original_price(orig, currency)));
    }

    let mut title = format!("{} {}", product.icon(), style(&product.name).bold());
    if product.popular {
        title.push_str(&format!(" {}", popular_badge()));
    }

    println!();
    println!("  {}  {}", title, style(product.id.as_str()).dim());
    println!("     {}", price);
    if let Some(offer) = &product.offer {
        println!("     {}", style(offer).green());
    }

    let (shown, more) = product.feature_preview(FEATURE_PREVIEW);
    for feature in shown {
        println!("     {} {}", style("✓").green(), feature);
    }
    if more > 0 {
        println!("     {}", style(format!("+{} more", more)).dim());
    }
}

fn list_categories(catalog: &Catalog, ctx: &Context) -> Result<()> {
    let counts = catalog.category_counts();

    if ctx.output.is_json() {
        ctx.output.json(&counts);
        return Ok(());
    }

    ctx.output.header("Categories");
    for tab in &counts {
        let count = tab.count.to_string();
        ctx.output.table_row(&[tab.id, tab.name, count.as_str()], &[10, 12, 4]);
    }

    Ok(())
}

fn show_plan(catalog: &Catalog, id: &str, currency: Currency, ctx: &Context) -> Result<()> {
    let product = catalog.require(&ProductId::new(id))?;

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    print_product(product, currency);
    if !product.description.is_empty() {
        println!();
        println!("  {}", product.description);
    }
    let (_, more) = product.feature_preview(FEATURE_PREVIEW);
    if more > 0 {
        ctx.output.info("All features:");
        for feature in &product.features {
            ctx.output.list_item(feature);
        }
    }

    Ok(())
}
