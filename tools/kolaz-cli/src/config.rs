//! CLI configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use kolaz_commerce::cart::ShippingRule;
use kolaz_commerce::search::DEFAULT_PER_PAGE;
use kolaz_commerce::{Currency, Money};
use kolaz_observability::LoggingConfig;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["kolaz.toml", ".kolaz.toml", "kolaz.json"];

/// Overrides `api.base_url`.
pub const API_URL_ENV: &str = "KOLAZ_API_URL";
/// Overrides `api.token`.
pub const API_TOKEN_ENV: &str = "KOLAZ_API_TOKEN";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file. `.json` files are JSON, anything else TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Apply `KOLAZ_API_URL` and `KOLAZ_API_TOKEN`.
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(API_URL_ENV).ok(),
            std::env::var(API_TOKEN_ENV).ok(),
        );
    }

    fn apply_overrides(&mut self, url: Option<String>, token: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.api.token = Some(token);
        }
    }

    /// Problems that make the config unusable, then ones worth a warning.
    pub fn validate(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let url = self.api.base_url.trim();
        if url.is_empty() {
            errors.push("api.base_url is required".to_string());
        } else if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(format!("api.base_url '{}' must start with http:// or https://", url));
        } else if url.starts_with("http://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
            warnings.push("api.base_url uses plain http for a remote host".to_string());
        }
        if self.api.timeout_secs == 0 {
            errors.push("api.timeout_secs must be greater than 0".to_string());
        }

        if Currency::from_code(&self.store.currency).is_none() {
            errors.push(format!("store.currency '{}' is not supported", self.store.currency));
        }
        if self.store.free_shipping_threshold < 0 {
            errors.push("store.free_shipping_threshold must not be negative".to_string());
        }
        if self.store.shipping_fee < 0 {
            errors.push("store.shipping_fee must not be negative".to_string());
        }
        if self.store.items_per_page <= 0 {
            errors.push("store.items_per_page must be greater than 0".to_string());
        }

        (errors, warnings)
    }
}

/// Product API connection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Bearer token for admin endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:5000/api/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            token: None,
        }
    }
}

/// Storefront pricing and listing settings. Amounts are in major units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold: i64,

    #[serde(default = "default_shipping_fee")]
    pub shipping_fee: i64,

    #[serde(default = "default_items_per_page")]
    pub items_per_page: i64,
}

fn default_currency() -> String {
    "BDT".to_string()
}

fn default_free_shipping_threshold() -> i64 {
    2000
}

fn default_shipping_fee() -> i64 {
    60
}

fn default_items_per_page() -> i64 {
    DEFAULT_PER_PAGE
}

impl StoreConfig {
    /// Configured currency, BDT when the code is unknown.
    pub fn currency(&self) -> Currency {
        Currency::from_code(&self.currency).unwrap_or_default()
    }

    pub fn shipping_rule(&self) -> ShippingRule {
        let currency = self.currency();
        ShippingRule::new(
            Money::from_major(self.free_shipping_threshold, currency),
            Money::from_major(self.shipping_fee, currency),
        )
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            free_shipping_threshold: default_free_shipping_threshold(),
            shipping_fee: default_shipping_fee(),
            items_per_page: default_items_per_page(),
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "json")
}

/// Generate a default kolaz.toml config file.
pub fn generate_default_config() -> String {
    r#"# Kolaz storefront configuration

[api]
base_url = "http://localhost:5000/api/v1"
timeout_secs = 10
# token = "..."  # or set KOLAZ_API_TOKEN

[store]
currency = "BDT"
free_shipping_threshold = 2000
shipping_fee = 60
items_per_page = 12

[logging]
level = "warn"
format = "human"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kolaz_observability::{LogFormat, LogLevel};

    #[test]
    fn test_default_template_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: CliConfig = toml::from_str(
            "[api]\nbase_url = \"https://api.kolaz.com/api/v1\"\n[logging]\nformat = \"json\"\n",
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://api.kolaz.com/api/v1");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.store.items_per_page, 12);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_save_and_load_json_and_toml() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.store.shipping_fee = 80;

        for name in ["kolaz.toml", "kolaz.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(CliConfig::load(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_overrides_skip_blank_values() {
        let mut config = CliConfig::default();
        config.apply_overrides(Some("https://staging.kolaz.com".into()), Some("  ".into()));
        assert_eq!(config.api.base_url, "https://staging.kolaz.com");
        assert_eq!(config.api.token, None);
    }

    #[test]
    fn test_validate() {
        let (errors, warnings) = CliConfig::default().validate();
        assert!(errors.is_empty());
        assert!(warnings.is_empty());

        let mut config = CliConfig::default();
        config.api.base_url = "ftp://x".into();
        config.store.currency = "XYZ".into();
        config.store.items_per_page = 0;
        let (errors, _) = config.validate();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_shipping_rule_from_store() {
        let rule = StoreConfig::default().shipping_rule();
        assert_eq!(rule, ShippingRule::default());
    }
}
