//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use velocity_cache::{Cache, FileStore};
use velocity_commerce::prelude::*;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match find_config_file(&cwd) {
                Some(path) => {
                    let path_str = path.to_string_lossy().to_string();
                    (CliConfig::load(&path_str)?, Some(path))
                }
                None => (CliConfig::default(), None),
            }
        };

        tracing::debug!(config = ?config_path, "loaded configuration");

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Directory holding the file-backed cart store.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.dir)
    }

    /// Open the cart store for this session.
    pub fn open_cart(&self) -> Result<CartStore<FileStore>> {
        let dir = self.storage_dir();
        let backend = FileStore::open(&dir)
            .with_context(|| format!("Failed to open cart storage: {}", dir.display()))?;

        let store = CartStore::open(Cache::new(backend), self.config.storage.key.clone());
        if let LoadSource::Recovered { reason } = store.load_source() {
            self.output
                .warn(&format!("Saved cart was unreadable and has been reset: {}", reason));
        }

        Ok(store)
    }

    /// Load the configured catalog, or the bundled one.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.config.catalog.path {
            Some(path) => {
                let path = self.resolve_path(path);
                Catalog::load(&path)
                    .with_context(|| format!("Failed to load catalog: {}", path.display()))
            }
            None => Catalog::builtin().context("Failed to load the bundled catalog"),
        }
    }

    /// Tax policy for order summaries.
    pub fn tax_policy(&self) -> Result<TaxPolicy> {
        let checkout = &self.config.checkout;
        let Some(currency) = Currency::from_code(&checkout.currency) else {
            bail!("Unsupported currency: {}", checkout.currency);
        };
        if !checkout.tax_rate.is_finite() || checkout.tax_rate < 0.0 {
            bail!("checkout.tax_rate must be a non-negative number");
        }

        Ok(TaxPolicy {
            rate: checkout.tax_rate,
            currency,
        })
    }
}

/// Find config file in directory tree.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_FILE_NAMES {
            let config_path = current.join(name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_in(dir: &Path, config: CliConfig) -> Context {
        Context {
            config,
            config_path: None,
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(".velocity.toml"), "").unwrap();

        let found = find_config_file(&nested).unwrap();
        assert_eq!(found, root.path().join(".velocity.toml"));
    }

    #[test]
    fn test_open_cart_uses_configured_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.storage.key = "test-cart".to_string();
        let ctx = context_in(dir.path(), config);

        let mut store = ctx.open_cart().unwrap();
        let catalog = ctx.catalog().unwrap();
        let plan = catalog.require(&ProductId::new("gaming-1")).unwrap();
        store.add_item(LineItemInput::from(plan)).unwrap();

        assert!(dir.path().join(".velocity").join("test-cart.json").is_file());
    }

    #[test]
    fn test_tax_policy_rejects_unknown_currency() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.checkout.currency = "XYZ".to_string();
        let ctx = context_in(dir.path(), config);

        assert!(ctx.tax_policy().is_err());
    }

    #[test]
    fn test_tax_policy_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path(), CliConfig::default());

        assert_eq!(ctx.tax_policy().unwrap(), TaxPolicy::default());
    }
}
