//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use velocity_commerce::cart::{DEFAULT_CART_KEY, DEFAULT_TAX_RATE};

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["velocity.toml", ".velocity.toml", "velocity.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Where the cart is kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Which catalog to browse.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Order summary settings.
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Cart storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory holding the file-backed store, relative to the working
    /// directory unless absolute.
    #[serde(default = "default_storage_dir")]
    pub dir: String,

    /// Key the cart is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_dir() -> String {
    ".velocity".to_string()
}

fn default_storage_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            key: default_storage_key(),
        }
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Catalog JSON file; the bundled catalog when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Checkout configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutConfig {
    /// Tax rate applied to the subtotal.
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,

    /// Currency code used for display.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_tax_rate() -> f64 {
    DEFAULT_TAX_RATE
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            tax_rate: default_tax_rate(),
            currency: default_currency(),
        }
    }
}

/// Generate a default velocity.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# VelocityTel storefront configuration

[storage]
dir = "{dir}"
key = "{key}"

[catalog]
# path = "products.json"

[checkout]
tax_rate = {rate}
currency = "USD"
"#,
        dir = default_storage_dir(),
        key = DEFAULT_CART_KEY,
        rate = DEFAULT_TAX_RATE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
            [checkout]
            currency = "EUR"
            "#,
        )
        .unwrap();

        assert_eq!(config.checkout.currency, "EUR");
        assert_eq!(config.checkout.tax_rate, 0.08);
        assert_eq!(config.storage.key, "velocitytel-cart");
        assert_eq!(config.storage.dir, ".velocity");
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_load_json_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("velocity.json");
        std::fs::write(&path, r#"{"catalog": {"path": "catalog.json"}}"#).unwrap();

        let config = CliConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.catalog.path.as_deref(), Some("catalog.json"));
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("velocity.toml");
        std::fs::write(&path, "[storage\n").unwrap();

        let err = CliConfig::load(path.to_str().unwrap()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse TOML config"));
    }
}
