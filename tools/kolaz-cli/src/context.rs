//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use kolaz_commerce::cart::CouponBook;
use kolaz_commerce::store::Store;
use kolaz_data::{CachedCatalog, FetchClient, ProductApi};
use tracing::debug;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;
use crate::session::SessionStore;

/// Execution context for CLI commands.
pub struct Context {
    pub config: CliConfig,
    /// File the config came from, if any.
    pub config_path: Option<PathBuf>,
    pub output: Output,
    pub cwd: PathBuf,
    pub session: SessionStore,
}

impl Context {
    /// Load context from an explicit config file or the nearest one found
    /// walking up from the working directory.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };
        config.apply_env();

        let session = SessionStore::new(&cwd);
        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            session,
        })
    }

    /// Cached product catalog for the configured API.
    pub fn catalog(&self) -> Result<CachedCatalog> {
        let api = &self.config.api;
        debug!(config = ?self.config_path, base_url = %api.base_url, "building catalog client");
        let mut client = FetchClient::http(&api.base_url, api.timeout())
            .with_context(|| format!("Cannot reach product API at {}", api.base_url))?;
        if let Some(token) = &api.token {
            client = client.with_token(token);
        }
        let api = ProductApi::new(client).with_currency(self.config.store.currency());
        Ok(CachedCatalog::new(api))
    }

    /// Store resumed from the saved session.
    pub fn store(&self) -> Result<Store> {
        let state = self.session.load()?;
        Ok(Store::new(CouponBook::default(), self.config.store.shipping_rule()).with_state(state))
    }

    pub fn save_store(&self, store: &Store) -> Result<()> {
        self.session.save(store.state())
    }
}

/// Nearest config file in `start` or its ancestors.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(".kolaz.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(dir.path().join(".kolaz.toml")));
    }

    #[test]
    fn test_find_config_prefers_first_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("kolaz.json"), "{}").unwrap();
        fs::write(dir.path().join("kolaz.toml"), "").unwrap();

        assert_eq!(find_config(dir.path()), Some(dir.path().join("kolaz.toml")));
    }
}
