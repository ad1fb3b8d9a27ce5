//! Localized String Resolution for Glossa
//!
//! Resolves dotted keys against nested translation catalogs and substitutes
//! positional arguments into `{0}`-style placeholders:
//!
//! - **Catalogs**: nested trees of template strings, one per language
//! - **Resolution**: dotted keys (`menu.file.open`) walk the tree
//! - **Substitution**: `{n}` selects the n-th argument
//! - **Rich content**: when an argument is a UI fragment rather than a
//!   scalar, the pieces are handed to an injected composer
//! - **Checking**: cross-language key and placeholder consistency for tooling
//!
//! # Quick Start
//!
//! ```rust
//! use glossa_i18n::{Catalog, LanguageSet, Translator};
//!
//! let languages = LanguageSet::new()
//!     .with_language(
//!         "en",
//!         Catalog::new().with_branch("cart", Catalog::new().with_text("total", "{0} items")),
//!     )
//!     .with_language(
//!         "zh",
//!         Catalog::new().with_branch("cart", Catalog::new().with_text("total", "{0} 件商品")),
//!     );
//!
//! let translator: Translator = Translator::new(languages, "en")?;
//! assert_eq!(translator.text("cart.total", &[3.into()]), "3 items");
//!
//! // Unknown keys are logged and render as empty text.
//! assert_eq!(translator.text("cart.missing", &[]), "");
//! # Ok::<(), glossa_i18n::I18nError>(())
//! ```
//!
//! # Rich Content
//!
//! ```rust
//! use glossa_i18n::{Arg, Catalog, LanguageSet, Segment, Translation, Translator};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Node {
//!     Text(String),
//!     Link(String),
//!     Group(Vec<Node>),
//! }
//!
//! let languages = LanguageSet::new()
//!     .with_language("en", Catalog::new().with_text("help", "See {0}."));
//!
//! let translator = Translator::new(languages, "en")?.with_composer(|segments: &[Segment<'_, Node>]| {
//!     Node::Group(
//!         segments
//!             .iter()
//!             .map(|segment| match segment {
//!                 Segment::Literal(text) => Node::Text(text.to_string()),
//!                 Segment::Arg(Arg::Scalar(value)) => Node::Text(value.to_string()),
//!                 Segment::Arg(Arg::Rich(node)) => node.clone(),
//!             })
//!             .collect(),
//!     )
//! });
//!
//! let out = translator.translate("help", &[Arg::rich(Node::Link("/docs".into()))])?;
//! assert!(matches!(out, Translation::Rich(Node::Group(_))));
//! # Ok::<(), glossa_i18n::I18nError>(())
//! ```

mod catalog;
mod check;
mod config;
mod error;
mod language;
mod resolve;
mod template;
mod translator;

pub use catalog::{Catalog, DEFAULT_NAMESPACE, Node};
pub use check::{CheckReport, LanguageIssues, PlaceholderMismatch, check, check_against};
pub use config::{ENV_CATALOG_DIR, ENV_DEFAULT_LANGUAGE, ENV_LANGUAGE, TranslatorConfig};
pub use error::I18nError;
pub use language::{CatalogFormat, LanguageSet};
pub use resolve::{Resolved, lookup, resolve};
pub use template::{
    Arg, ComposeFn, Placeholder, Scalar, Segment, Substitution, Translation, placeholders,
    substitute,
};
pub use translator::Translator;

/// Result type for i18n operations
pub type Result<T> = std::result::Result<T, I18nError>;

/// Translate with scalar arguments.
///
/// `t!(translator, "menu.open", name)` expands to
/// `translator.text("menu.open", &[Scalar::from(name)])`.
#[macro_export]
macro_rules! t {
    ($translator:expr, $key:expr $(,)?) => {
        $translator.text($key, &[])
    };
    ($translator:expr, $key:expr, $($arg:expr),+ $(,)?) => {
        $translator.text($key, &[$($crate::Scalar::from($arg)),+])
    };
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Arg, Catalog, I18nError, LanguageSet, Result, Scalar, Segment, Translation, Translator,
        TranslatorConfig, t,
    };
}
