//! Session persistence between invocations.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kolaz_commerce::store::AppState;

/// Directory holding CLI state, relative to the working directory.
pub const SESSION_DIR: &str = ".kolaz";
const SESSION_FILE: &str = "session.json";

/// JSON snapshot of the session state.
///
/// Catalog listings are not saved; they are refetched through the cache.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(root: &Path) -> Self {
        Self {
            path: root.join(SESSION_DIR).join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved state, or a fresh one when nothing was saved yet.
    pub fn load(&self) -> Result<AppState> {
        if !self.path.exists() {
            return Ok(AppState::default());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session: {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session: {}", self.path.display()))
    }

    pub fn save(&self, state: &AppState) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        let mut snapshot = state.clone();
        snapshot.products.clear();
        snapshot.featured_products.clear();
        snapshot.best_seller_products.clear();
        snapshot.colors.clear();
        snapshot.categories.clear();
        snapshot.is_loading = false;

        let content = serde_json::to_string_pretty(&snapshot)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write session: {}", self.path.display()))
    }

    /// Delete the snapshot. Returns whether one existed.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove session: {}", self.path.display()))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kolaz_commerce::catalog::Product;
    use kolaz_commerce::store::{Action, Store};
    use kolaz_commerce::{Currency, Money};

    fn jeans() -> Product {
        let mut p = Product::new("IRT-DJ-001", "Slim Jeans", Money::from_major(2500, Currency::BDT));
        p.sizes = vec!["32".into()];
        p
    }

    #[test]
    fn test_missing_session_is_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = SessionStore::new(dir.path());
        assert_eq!(sessions.load().unwrap(), AppState::default());
        assert!(!sessions.clear().unwrap());
    }

    #[test]
    fn test_cart_survives_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = SessionStore::new(dir.path());

        let mut store = Store::default();
        store
            .dispatch(Action::AddToCart {
                product: jeans(),
                size: "32".into(),
                color: "Indigo".into(),
                quantity: 2,
            })
            .unwrap();
        store.dispatch(Action::ApplyCoupon("KOLAZ10".into())).unwrap();
        store.dispatch(Action::SetProducts(vec![jeans()])).unwrap();
        sessions.save(store.state()).unwrap();

        let loaded = sessions.load().unwrap();
        assert_eq!(loaded.cart, store.state().cart);
        assert!(loaded.products.is_empty());
        assert!(sessions.path().ends_with(".kolaz/session.json"));

        assert!(sessions.clear().unwrap());
        assert_eq!(sessions.load().unwrap(), AppState::default());
    }

    #[test]
    fn test_corrupt_session_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = SessionStore::new(dir.path());
        fs::create_dir_all(dir.path().join(SESSION_DIR)).unwrap();
        fs::write(sessions.path(), "{not json").unwrap();
        assert!(sessions.load().is_err());
    }
}
