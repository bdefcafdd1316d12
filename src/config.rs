use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::storage::StoreOptions;

/// Default backing file when neither the CLI nor the config names one
pub const DEFAULT_DATABASE: &str = "hipster_cookbook.db";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ShelfConfig {
    pub database: Option<String>,
    pub enforce_foreign_keys: Option<bool>,
}

impl ShelfConfig {
    /// CLI flag wins over the config file, which wins over the default
    pub fn database_path(&self, cli: Option<&Path>) -> PathBuf {
        if let Some(path) = cli {
            return path.to_path_buf();
        }
        self.database
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
    }

    pub fn store_options(&self) -> StoreOptions {
        let defaults = StoreOptions::default();
        StoreOptions {
            enforce_foreign_keys: self.enforce_foreign_keys.unwrap_or(defaults.enforce_foreign_keys),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("cookshelf.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<ShelfConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: ShelfConfig = toml::from_str(&contents)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &ShelfConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_precedence() {
        let config = ShelfConfig {
            database: Some("from_config.db".to_string()),
            enforce_foreign_keys: None,
        };
        assert_eq!(config.database_path(Some(Path::new("cli.db"))), PathBuf::from("cli.db"));
        assert_eq!(config.database_path(None), PathBuf::from("from_config.db"));
        assert_eq!(ShelfConfig::default().database_path(None), PathBuf::from(DEFAULT_DATABASE));
    }

    #[test]
    fn test_store_options_default_to_enforced() {
        assert!(ShelfConfig::default().store_options().enforce_foreign_keys);
        let lenient = ShelfConfig { database: None, enforce_foreign_keys: Some(false) };
        assert!(!lenient.store_options().enforce_foreign_keys);
    }

    #[test]
    fn test_write_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookshelf.toml");
        let config = ShelfConfig {
            database: Some("shelf.db".to_string()),
            enforce_foreign_keys: Some(true),
        };

        write_config(&path, &config, false).unwrap();
        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &config, true).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("absent.toml"))).unwrap().is_none());
    }
}
