//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use spice_commerce::catalog::Catalog;
use spice_commerce::config::StorefrontConfig;

use crate::output::Output;

/// Config file names looked up in each directory, in order.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: StorefrontConfig,
    /// Where the configuration came from, if not defaults.
    pub config_path: Option<PathBuf>,
    /// Products on sale.
    pub catalog: Catalog,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load config and catalog.
    ///
    /// An explicit config path must load. A discovered one that fails is
    /// reported and skipped so `spice config init --force` can replace it.
    pub fn load(config_path: Option<&str>, catalog_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve_path(&cwd, path);
            let config = StorefrontConfig::load(&path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?;
            (config, Some(path))
        } else {
            match find_config(&cwd) {
                Some(path) => match StorefrontConfig::load(&path) {
                    Ok(config) => (config, Some(path)),
                    Err(e) => {
                        output.warn(&format!("Ignoring {}: {}", path.display(), e));
                        (StorefrontConfig::default(), None)
                    }
                },
                None => (StorefrontConfig::default(), None),
            }
        };

        let catalog = match catalog_path {
            Some(path) => {
                let path = resolve_path(&cwd, path);
                Catalog::load(&path)
                    .with_context(|| format!("Failed to load catalog: {}", path.display()))?
            }
            None => Catalog::builtin(),
        };
        config.check_catalog(&catalog).context(
            "Catalog prices do not match store.currency; fix the config or pass a matching --catalog",
        )?;

        if let Some(path) = &config_path {
            output.debug(&format!("Using config {}", path.display()));
        }
        output.debug(&format!("{} products in catalog", catalog.len()));

        Ok(Self {
            config,
            config_path,
            catalog,
            output,
            cwd,
        })
    }
}

/// Find a config file in the directory tree.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Resolve a path relative to the working directory.
fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("spice-cli-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_find_config_walks_up() {
        let root = scratch_dir("walk");
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join("storefront.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(root.join("storefront.toml")));

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_find_config_prefers_toml() {
        let root = scratch_dir("prefer");
        std::fs::write(root.join("storefront.json"), "{}").unwrap();
        std::fs::write(root.join("storefront.toml"), "").unwrap();

        assert_eq!(find_config(&root), Some(root.join("storefront.toml")));

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_load_rejects_currency_the_catalog_is_not_priced_in() {
        let root = scratch_dir("currency");
        let path = root.join("storefront.toml");
        std::fs::write(&path, "[store]\ncurrency = \"USD\"\n").unwrap();

        let result = Context::load(path.to_str(), None, Output::new(false, true));
        let message = format!("{:#}", result.err().unwrap());
        assert!(message.contains("store.currency"));
        assert!(message.contains("Currency mismatch"));

        std::fs::write(&path, "[store]\ncurrency = \"GHS\"\n").unwrap();
        assert!(Context::load(path.to_str(), None, Output::new(false, true)).is_ok());

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_resolve_path() {
        let cwd = Path::new("/srv/shop");
        assert_eq!(resolve_path(cwd, "products.json"), cwd.join("products.json"));
        assert_eq!(resolve_path(cwd, "/etc/shop.toml"), PathBuf::from("/etc/shop.toml"));
    }
}
