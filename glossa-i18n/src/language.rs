//! Language Sets
//!
//! Maps language identifiers to their catalogs, and loads them from disk.

use crate::{Catalog, I18nError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// On-disk catalog formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    #[cfg(feature = "toml")]
    Toml,
}

impl CatalogFormat {
    /// Format for a file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(CatalogFormat::Json),
            #[cfg(feature = "toml")]
            "toml" => Some(CatalogFormat::Toml),
            _ => None,
        }
    }

    /// Parse `source` in this format.
    pub fn parse(&self, source: &str) -> Result<Catalog> {
        match self {
            CatalogFormat::Json => Catalog::from_json(source),
            #[cfg(feature = "toml")]
            CatalogFormat::Toml => Catalog::from_toml(source),
        }
    }
}

/// Catalogs keyed by language identifier.
///
/// Catalogs are shared behind [`Arc`] and never mutated once inserted.
#[derive(Debug, Clone, Default)]
pub struct LanguageSet {
    languages: BTreeMap<String, Arc<Catalog>>,
}

impl LanguageSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a language.
    pub fn insert(&mut self, id: impl Into<String>, catalog: Catalog) {
        self.languages.insert(id.into(), Arc::new(catalog));
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_language(mut self, id: impl Into<String>, catalog: Catalog) -> Self {
        self.insert(id, catalog);
        self
    }

    /// Catalog for a language.
    pub fn get(&self, id: &str) -> Option<&Arc<Catalog>> {
        self.languages.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.languages.contains_key(id)
    }

    /// Language identifiers in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// `(id, catalog)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Catalog)> {
        self.languages.iter().map(|(id, catalog)| (id.as_str(), catalog.as_ref()))
    }

    /// Load every catalog file in a directory.
    ///
    /// Expected structure:
    /// - `locales/en.json`
    /// - `locales/zh.json`
    /// - `locales/zh-TW.toml`
    ///
    /// The file stem is the language identifier. Files with other
    /// extensions are skipped.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();

        if !dir.is_dir() {
            return Err(I18nError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("catalog directory not found: {}", dir.display()),
            )));
        }

        let mut set = Self::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }

            let Some(format) = path
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(CatalogFormat::from_extension)
            else {
                continue;
            };

            let id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| I18nError::parse(path.display().to_string(), "invalid file name"))?;

            let source = fs::read_to_string(&path)?;
            let catalog = format.parse(&source).map_err(|e| match e {
                I18nError::Parse { message, .. } => {
                    I18nError::parse(path.display().to_string(), message)
                }
                other => other,
            })?;

            glossa_log::debug!(
                target: "glossa::language",
                "loaded language `{}` from {} ({} keys)",
                id,
                path.display(),
                catalog.keys().len()
            );
            set.insert(id, catalog);
        }

        Ok(set)
    }
}

impl FromIterator<(String, Catalog)> for LanguageSet {
    fn from_iter<I: IntoIterator<Item = (String, Catalog)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (id, catalog) in iter {
            set.insert(id, catalog);
        }
        set
    }
}
