//! Error types for the Glossa CLI.

use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Catalog loading, configuration or translation failure
    #[error(transparent)]
    I18n(#[from] glossa_i18n::I18nError),

    /// IO error writing output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// `check` found problems
    #[error("{0} catalog issues found")]
    CheckFailed(usize),

    /// `render --strict` on a key that does not resolve
    #[error("key `{key}` does not resolve to a string in `{language}`")]
    UnresolvedKey { key: String, language: String },
}
