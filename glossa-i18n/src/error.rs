//! Error types for i18n operations

use thiserror::Error;

/// Errors that can occur while building or using a translator.
#[derive(Debug, Error)]
pub enum I18nError {
    /// The dotted key addresses nothing in the catalog
    #[error("i18n key not found: {key} (language: {language})")]
    KeyNotFound { key: String, language: String },

    /// The dotted key addresses a sub-tree, not a template string
    #[error("i18n key {key} is not a string (language: {language})")]
    TemplateType { key: String, language: String },

    /// Rich arguments were supplied but no composer is configured
    #[error("rich-content composer not configured (key: {key})")]
    MissingComposer { key: String },

    /// Language identifier not present in the language set
    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    /// A translator needs at least one language
    #[error("language set is empty")]
    EmptyLanguageSet,

    /// Failed to parse a catalog or configuration source
    #[error("failed to parse {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// Invalid configuration values
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl I18nError {
    pub(crate) fn parse(source_name: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error is a lookup failure that translation degrades on.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. } | Self::TemplateType { .. })
    }
}
