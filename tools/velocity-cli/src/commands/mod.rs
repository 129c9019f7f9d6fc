//! CLI command implementations.

pub mod cart;
pub mod config;
pub mod plans;

use clap::{Args, Subcommand};

/// Arguments for the plans command.
#[derive(Args)]
pub struct PlansArgs {
    #[command(subcommand)]
    pub command: Option<PlansCommand>,

    /// Only show one category (gaming, family, business, student, travel).
    #[arg(short, long)]
    pub category: Option<String>,
}

#[derive(Subcommand)]
pub enum PlansCommand {
    /// List products.
    List,
    /// List category tabs with product counts.
    Categories,
    /// Show details for a single product.
    Show {
        /// Product ID.
        id: String,
    },
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart contents and the order summary.
    Show,
    /// Add one unit of a catalog product.
    Add {
        /// Product ID.
        id: String,
    },
    /// Remove a product's line.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Set a line's quantity; zero or less removes it.
    Set {
        /// Product ID.
        id: String,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Increase a line's quantity by one.
    Inc {
        /// Product ID.
        id: String,
    },
    /// Decrease a line's quantity by one, removing it at zero.
    Dec {
        /// Product ID.
        id: String,
    },
    /// Remove every line.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the number of units in the cart.
    Count,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
