//! Translator configuration
//!
//! Where catalogs live and which languages to select, from environment
//! variables, a `.env` file, or a JSON/TOML config file.

use crate::{I18nError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding one catalog file per language.
pub const ENV_CATALOG_DIR: &str = "GLOSSA_CATALOG_DIR";
/// Language the translator falls back to and starts with.
pub const ENV_DEFAULT_LANGUAGE: &str = "GLOSSA_DEFAULT_LANGUAGE";
/// Language selected at startup, if different from the default.
pub const ENV_LANGUAGE: &str = "GLOSSA_LANGUAGE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Catalog directory (`locales` by default)
    pub catalog_dir: PathBuf,
    /// Default language identifier (`en` by default)
    pub default_language: String,
    /// Language selected at startup
    pub language: Option<String>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            catalog_dir: PathBuf::from("locales"),
            default_language: "en".to_string(),
            language: None,
        }
    }
}

impl TranslatorConfig {
    pub fn new(catalog_dir: impl Into<PathBuf>, default_language: impl Into<String>) -> Self {
        Self {
            catalog_dir: catalog_dir.into(),
            default_language: default_language.into(),
            language: None,
        }
    }

    /// Select `language` at startup.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Read `GLOSSA_*` variables, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_CATALOG_DIR) {
            config.catalog_dir = PathBuf::from(dir);
        }
        if let Some(language) = lookup(ENV_DEFAULT_LANGUAGE) {
            config.default_language = language;
        }
        config.language = lookup(ENV_LANGUAGE).filter(|l| !l.trim().is_empty());

        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json` or `.toml` file. Missing fields take defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let config: Self = match ext.as_str() {
            "json" => serde_json::from_str(&content)
                .map_err(|e| I18nError::parse(path.display().to_string(), e))?,
            #[cfg(feature = "toml")]
            "toml" => toml::from_str(&content)
                .map_err(|e| I18nError::parse(path.display().to_string(), e))?,
            other => {
                return Err(I18nError::Config(format!(
                    "unsupported config format: {:?}",
                    other
                )));
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_language.trim().is_empty() {
            return Err(I18nError::Config("default language is empty".to_string()));
        }
        if self.catalog_dir.as_os_str().is_empty() {
            return Err(I18nError::Config("catalog directory is empty".to_string()));
        }
        Ok(())
    }
}
