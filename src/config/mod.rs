//! Configuration loading and management

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming a YAML configuration file
pub const CONFIG_ENV: &str = "CATALOG_CONFIG";
/// Environment override for [`CatalogConfig::data_dir`]
pub const DATA_DIR_ENV: &str = "CATALOG_DATA_DIR";
/// Environment override for [`CatalogConfig::bind_addr`]
pub const BIND_ADDR_ENV: &str = "CATALOG_BIND_ADDR";

/// Complete configuration for the catalog server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Root directory holding the record directories
    pub data_dir: PathBuf,

    /// Cart directory name, relative to `data_dir`
    pub carts_dir: String,

    /// Product directory name, relative to `data_dir`
    pub products_dir: String,

    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// Identifier candidates tried before giving up with a conflict
    pub id_attempts: u32,

    /// Serve the GraphQL playground at `/graphql/playground`
    pub playground: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            carts_dir: "carts".to_string(),
            products_dir: "products".to_string(),
            bind_addr: "127.0.0.1:4000".to_string(),
            id_attempts: 3,
            playground: true,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from the process environment
    ///
    /// Reads the YAML file named by `CATALOG_CONFIG` when set, otherwise
    /// starts from defaults, then applies `CATALOG_DATA_DIR` and
    /// `CATALOG_BIND_ADDR`.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply overrides looked up through `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(DATA_DIR_ENV) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(addr) = lookup(BIND_ADDR_ENV) {
            self.bind_addr = addr;
        }
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.id_attempts == 0 {
            bail!("id_attempts must be at least 1");
        }
        if self.carts_dir.is_empty() || self.products_dir.is_empty() {
            bail!("carts_dir and products_dir must not be empty");
        }
        if self.carts_dir == self.products_dir {
            bail!("carts_dir and products_dir must differ");
        }
        Ok(())
    }

    /// Directory holding cart documents
    pub fn carts_path(&self) -> PathBuf {
        self.data_dir.join(&self.carts_dir)
    }

    /// Directory holding product documents
    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(&self.products_dir)
    }

    /// Default configuration rooted at `data_dir`
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }
}
